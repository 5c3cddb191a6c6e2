//! Composite node payloads
//!
//! Larger `Expr` variants box one of these structs so the enum itself stays
//! small.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, LabelTarget, Variable};
use super::operators::{BinaryOp, UnaryOp};
use crate::members::MemberRef;
use crate::types::TypeRef;

// ============================================================================
// Construction
// ============================================================================

/// Object construction `new T(args) { initializers }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    pub ty: TypeRef,
    /// Constructor, when the metadata layer resolved one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<MemberRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initializers: Vec<Initializer>,
}

/// Object or collection initializer entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    /// `Member = value`
    Member { member: MemberRef, value: Expr },
    /// Collection `Add` call: `value` or `{ a, b }`
    Elements { args: Vec<Expr> },
    /// `Member = { ... }`
    Nested {
        member: MemberRef,
        initializers: Vec<Initializer>,
    },
}

/// Array construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArray {
    pub element_type: TypeRef,
    pub init: ArrayInit,
}

/// How an array is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayInit {
    /// `new[] { a, b }`
    Elements(Vec<Expr>),
    /// `new T[n, m]`
    Bounds(Vec<Expr>),
}

impl NewArray {
    /// Array type produced
    pub fn array_type(&self) -> TypeRef {
        let rank = match &self.init {
            ArrayInit::Bounds(bounds) => bounds.len().max(1) as u8,
            ArrayInit::Elements(_) => 1,
        };
        TypeRef::Array {
            element: Box::new(self.element_type.clone()),
            rank,
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Lambda `(a, b) => body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub params: Vec<Variable>,
    pub body: Expr,
    pub return_type: TypeRef,
    /// Explicit delegate type; `Func`/`Action` is inferred otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_type: Option<TypeRef>,
}

impl Lambda {
    /// Delegate type of the lambda
    pub fn delegate(&self) -> TypeRef {
        if let Some(ty) = &self.delegate_type {
            return ty.clone();
        }
        let mut args: Vec<TypeRef> = self.params.iter().map(|p| p.ty.clone()).collect();
        if self.return_type.is_void() {
            TypeRef::action(args)
        } else {
            args.push(self.return_type.clone());
            TypeRef::func(args)
        }
    }
}

// ============================================================================
// Control flow
// ============================================================================

/// Conditional `test ? a : b` or `if (test) { a } else { b }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub test: Expr,
    pub if_true: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_false: Option<Expr>,
    pub ty: TypeRef,
}

impl Conditional {
    /// Alternate branch, ignoring `default(void)` placeholders
    pub fn alternate(&self) -> Option<&Expr> {
        self.if_false.as_ref().filter(|e| !e.is_empty_statement())
    }
}

/// Statement sequence with block-scoped variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    pub statements: Vec<Expr>,
    /// Result type; the final statement's type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

impl Block {
    /// Result type of the block
    pub fn result_type(&self) -> TypeRef {
        match (&self.ty, self.statements.last()) {
            (Some(ty), _) => ty.clone(),
            (None, Some(last)) => last.ty(),
            (None, None) => TypeRef::VOID,
        }
    }
}

/// Infinite loop exited through its break label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopExpr {
    pub body: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_label: Option<LabelTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_label: Option<LabelTarget>,
}

/// `switch` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub value: Expr,
    pub cases: Vec<SwitchCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Expr>,
    pub ty: TypeRef,
}

/// One switch arm with its test values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub tests: Vec<Expr>,
    pub body: Expr,
}

/// `try` with handlers, fault and finally clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryBlock {
    pub body: Expr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<CatchHandler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finally: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<Expr>,
    pub ty: TypeRef,
}

/// `catch (T e) when (filter) { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchHandler {
    pub exception_type: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<Variable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expr>,
    pub body: Expr,
}

/// Jump flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GotoKind {
    Goto,
    Return,
    Break,
    Continue,
}

/// Jump to a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goto {
    pub kind: GotoKind,
    pub target: LabelTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
}

/// Label definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelExpr {
    pub target: LabelTarget,
    /// Value produced when control falls through to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Expr>,
}

// ============================================================================
// Dynamic and opaque nodes
// ============================================================================

/// Late-bound operation
///
/// Argument layout per operation: the first argument is the receiver for
/// member and index operations, setters take the assigned value last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicExpr {
    pub operation: DynamicOperation,
    pub args: Vec<Expr>,
    pub ty: TypeRef,
}

/// Late-bound operation kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicOperation {
    GetMember {
        name: String,
    },
    SetMember {
        name: String,
    },
    InvokeMember {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generic_args: Vec<TypeRef>,
    },
    Invoke,
    GetIndex,
    SetIndex,
    Convert {
        ty: TypeRef,
    },
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// Binder known only by its textual description, e.g. `GetMember Name`
    Described(String),
}

/// Source location marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub document: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    /// Clears the active sequence point instead of setting one
    #[serde(default)]
    pub clear: bool,
}

/// Node of a kind this model does not know, carried with a textual dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub kind: String,
    pub dump: String,
    pub ty: TypeRef,
}
