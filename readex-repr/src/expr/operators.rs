//! Operator types
//!
//! Unary, binary and assignment operators with their C# spellings and
//! precedence tiers.

use serde::{Deserialize, Serialize};

/// Precedence tiers, higher binds tighter
pub mod precedence {
    pub const ASSIGNMENT: u8 = 1;
    pub const CONDITIONAL: u8 = 2;
    pub const COALESCE: u8 = 3;
    pub const OR_ELSE: u8 = 4;
    pub const AND_ALSO: u8 = 5;
    pub const BIT_OR: u8 = 6;
    pub const EXCLUSIVE_OR: u8 = 7;
    pub const BIT_AND: u8 = 8;
    pub const EQUALITY: u8 = 9;
    pub const RELATIONAL: u8 = 10;
    pub const SHIFT: u8 = 11;
    pub const ADDITIVE: u8 = 12;
    pub const MULTIPLICATIVE: u8 = 13;
    pub const UNARY: u8 = 14;
    pub const PRIMARY: u8 = 15;
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnaryOp {
    /// Arithmetic negation `-x`
    Negate = 0,
    /// Overflow-checked negation `checked(-x)`
    NegateChecked = 1,
    /// Unary plus `+x`
    UnaryPlus = 2,
    /// Logical not `!x`
    Not = 3,
    /// Bitwise complement `~x`
    OnesComplement = 4,
    /// Truth test, rendered as the bare operand
    IsTrue = 5,
    /// Falsity test `!x`
    IsFalse = 6,
    /// Value plus one `++x`
    Increment = 7,
    /// Value minus one `--x`
    Decrement = 8,
    /// `++x`
    PreIncrementAssign = 9,
    /// `x++`
    PostIncrementAssign = 10,
    /// `--x`
    PreDecrementAssign = 11,
    /// `x--`
    PostDecrementAssign = 12,
    /// `x.Length`
    ArrayLength = 13,
}

impl UnaryOp {
    /// Parse from text name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "negate" => Some(Self::Negate),
            "negate_checked" => Some(Self::NegateChecked),
            "unary_plus" => Some(Self::UnaryPlus),
            "not" => Some(Self::Not),
            "ones_complement" => Some(Self::OnesComplement),
            "is_true" => Some(Self::IsTrue),
            "is_false" => Some(Self::IsFalse),
            "increment" => Some(Self::Increment),
            "decrement" => Some(Self::Decrement),
            "pre_increment_assign" => Some(Self::PreIncrementAssign),
            "post_increment_assign" => Some(Self::PostIncrementAssign),
            "pre_decrement_assign" => Some(Self::PreDecrementAssign),
            "post_decrement_assign" => Some(Self::PostDecrementAssign),
            "array_length" => Some(Self::ArrayLength),
            _ => None,
        }
    }

    /// Format as text name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::NegateChecked => "negate_checked",
            Self::UnaryPlus => "unary_plus",
            Self::Not => "not",
            Self::OnesComplement => "ones_complement",
            Self::IsTrue => "is_true",
            Self::IsFalse => "is_false",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::PreIncrementAssign => "pre_increment_assign",
            Self::PostIncrementAssign => "post_increment_assign",
            Self::PreDecrementAssign => "pre_decrement_assign",
            Self::PostDecrementAssign => "post_decrement_assign",
            Self::ArrayLength => "array_length",
        }
    }

    /// Symbol text; empty for operators rendered without one
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate | Self::NegateChecked => "-",
            Self::UnaryPlus => "+",
            Self::Not | Self::IsFalse => "!",
            Self::OnesComplement => "~",
            Self::Increment | Self::PreIncrementAssign | Self::PostIncrementAssign => "++",
            Self::Decrement | Self::PreDecrementAssign | Self::PostDecrementAssign => "--",
            Self::IsTrue | Self::ArrayLength => "",
        }
    }

    /// Is the symbol written after the operand?
    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrementAssign | Self::PostDecrementAssign)
    }

    /// Does this operator mutate its operand?
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::PreIncrementAssign
                | Self::PostIncrementAssign
                | Self::PreDecrementAssign
                | Self::PostDecrementAssign
        )
    }

    /// Is this overflow-checked?
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::NegateChecked)
    }

    /// Precedence of the rendered form
    pub const fn precedence(self) -> u8 {
        match self {
            Self::PostIncrementAssign | Self::PostDecrementAssign | Self::ArrayLength => {
                precedence::PRIMARY
            }
            _ => precedence::UNARY,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BinaryOp {
    // Arithmetic
    Add = 0,
    AddChecked = 1,
    Subtract = 2,
    SubtractChecked = 3,
    Multiply = 4,
    MultiplyChecked = 5,
    Divide = 6,
    Modulo = 7,
    /// Rendered as `Math.Pow(a, b)`
    Power = 8,

    // Bitwise / logical
    And = 9,
    Or = 10,
    ExclusiveOr = 11,
    AndAlso = 12,
    OrElse = 13,

    // Comparison
    Equal = 14,
    NotEqual = 15,
    LessThan = 16,
    LessThanOrEqual = 17,
    GreaterThan = 18,
    GreaterThanOrEqual = 19,

    // Shift
    LeftShift = 20,
    RightShift = 21,

    /// Null coalescing `a ?? b`
    Coalesce = 22,
    /// Array element access `a[i]`
    ArrayIndex = 23,
}

impl BinaryOp {
    /// Parse from symbol or text name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "+" | "add" => Some(Self::Add),
            "add_checked" => Some(Self::AddChecked),
            "-" | "subtract" => Some(Self::Subtract),
            "subtract_checked" => Some(Self::SubtractChecked),
            "*" | "multiply" => Some(Self::Multiply),
            "multiply_checked" => Some(Self::MultiplyChecked),
            "/" | "divide" => Some(Self::Divide),
            "%" | "modulo" => Some(Self::Modulo),
            "power" => Some(Self::Power),
            "&" | "and" => Some(Self::And),
            "|" | "or" => Some(Self::Or),
            "^" | "exclusive_or" => Some(Self::ExclusiveOr),
            "&&" | "and_also" => Some(Self::AndAlso),
            "||" | "or_else" => Some(Self::OrElse),
            "==" | "equal" => Some(Self::Equal),
            "!=" | "not_equal" => Some(Self::NotEqual),
            "<" | "less_than" => Some(Self::LessThan),
            "<=" | "less_than_or_equal" => Some(Self::LessThanOrEqual),
            ">" | "greater_than" => Some(Self::GreaterThan),
            ">=" | "greater_than_or_equal" => Some(Self::GreaterThanOrEqual),
            "<<" | "left_shift" => Some(Self::LeftShift),
            ">>" | "right_shift" => Some(Self::RightShift),
            "??" | "coalesce" => Some(Self::Coalesce),
            "array_index" => Some(Self::ArrayIndex),
            _ => None,
        }
    }

    /// Format as symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add | Self::AddChecked => "+",
            Self::Subtract | Self::SubtractChecked => "-",
            Self::Multiply | Self::MultiplyChecked => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "**",
            Self::And => "&",
            Self::Or => "|",
            Self::ExclusiveOr => "^",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Coalesce => "??",
            Self::ArrayIndex => "[]",
        }
    }

    /// Format as text name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::AddChecked => "add_checked",
            Self::Subtract => "subtract",
            Self::SubtractChecked => "subtract_checked",
            Self::Multiply => "multiply",
            Self::MultiplyChecked => "multiply_checked",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Power => "power",
            Self::And => "and",
            Self::Or => "or",
            Self::ExclusiveOr => "exclusive_or",
            Self::AndAlso => "and_also",
            Self::OrElse => "or_else",
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LeftShift => "left_shift",
            Self::RightShift => "right_shift",
            Self::Coalesce => "coalesce",
            Self::ArrayIndex => "array_index",
        }
    }

    /// Is this overflow-checked?
    pub const fn is_checked(self) -> bool {
        matches!(
            self,
            Self::AddChecked | Self::SubtractChecked | Self::MultiplyChecked
        )
    }

    /// The unchecked counterpart of a checked operator
    pub const fn unchecked(self) -> Self {
        match self {
            Self::AddChecked => Self::Add,
            Self::SubtractChecked => Self::Subtract,
            Self::MultiplyChecked => Self::Multiply,
            other => other,
        }
    }

    /// Is this a comparison?
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
        )
    }

    /// Is this a short-circuiting logical operator?
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::AndAlso | Self::OrElse)
    }

    /// Precedence of the rendered form (higher = binds tighter)
    pub const fn precedence(self) -> u8 {
        match self.unchecked() {
            Self::Power | Self::ArrayIndex => precedence::PRIMARY,
            Self::Multiply | Self::Divide | Self::Modulo => precedence::MULTIPLICATIVE,
            Self::Add | Self::Subtract => precedence::ADDITIVE,
            Self::LeftShift | Self::RightShift => precedence::SHIFT,
            Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual => precedence::RELATIONAL,
            Self::Equal | Self::NotEqual => precedence::EQUALITY,
            Self::And => precedence::BIT_AND,
            Self::ExclusiveOr => precedence::EXCLUSIVE_OR,
            Self::Or => precedence::BIT_OR,
            Self::AndAlso => precedence::AND_ALSO,
            Self::OrElse => precedence::OR_ELSE,
            Self::Coalesce => precedence::COALESCE,
            _ => precedence::PRIMARY,
        }
    }

    /// Is this operator left-associative?
    pub const fn is_left_assoc(self) -> bool {
        !matches!(self, Self::Coalesce)
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssignOp {
    Assign = 0,
    AddAssign = 1,
    AddAssignChecked = 2,
    SubtractAssign = 3,
    SubtractAssignChecked = 4,
    MultiplyAssign = 5,
    MultiplyAssignChecked = 6,
    DivideAssign = 7,
    ModuloAssign = 8,
    /// Rendered as `x = Math.Pow(x, y)`
    PowerAssign = 9,
    AndAssign = 10,
    OrAssign = 11,
    ExclusiveOrAssign = 12,
    LeftShiftAssign = 13,
    RightShiftAssign = 14,
    CoalesceAssign = 15,
}

impl AssignOp {
    /// Format as symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Assign | Self::PowerAssign => "=",
            Self::AddAssign | Self::AddAssignChecked => "+=",
            Self::SubtractAssign | Self::SubtractAssignChecked => "-=",
            Self::MultiplyAssign | Self::MultiplyAssignChecked => "*=",
            Self::DivideAssign => "/=",
            Self::ModuloAssign => "%=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::ExclusiveOrAssign => "^=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::CoalesceAssign => "??=",
        }
    }

    /// Binary operator a compound assignment applies
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::AddAssign => Some(BinaryOp::Add),
            Self::AddAssignChecked => Some(BinaryOp::AddChecked),
            Self::SubtractAssign => Some(BinaryOp::Subtract),
            Self::SubtractAssignChecked => Some(BinaryOp::SubtractChecked),
            Self::MultiplyAssign => Some(BinaryOp::Multiply),
            Self::MultiplyAssignChecked => Some(BinaryOp::MultiplyChecked),
            Self::DivideAssign => Some(BinaryOp::Divide),
            Self::ModuloAssign => Some(BinaryOp::Modulo),
            Self::PowerAssign => Some(BinaryOp::Power),
            Self::AndAssign => Some(BinaryOp::And),
            Self::OrAssign => Some(BinaryOp::Or),
            Self::ExclusiveOrAssign => Some(BinaryOp::ExclusiveOr),
            Self::LeftShiftAssign => Some(BinaryOp::LeftShift),
            Self::RightShiftAssign => Some(BinaryOp::RightShift),
            Self::CoalesceAssign => Some(BinaryOp::Coalesce),
        }
    }

    /// Is this overflow-checked?
    pub const fn is_checked(self) -> bool {
        matches!(
            self,
            Self::AddAssignChecked | Self::SubtractAssignChecked | Self::MultiplyAssignChecked
        )
    }
}
