//! Expression tree
//!
//! `Expr` is a tagged union of every construct the renderer understands.
//! Trees are immutable once built; variables and labels are identified by
//! tree-unique ids rather than by name.

use serde::{Deserialize, Serialize};

use super::literal::{Constant, ConstantValue};
use super::nodes::{
    Block, Conditional, DebugInfo, DynamicExpr, Extension, Goto, GotoKind, LabelExpr, Lambda,
    LoopExpr, NewArray, NewObject, Switch, TryBlock,
};
use super::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::members::MemberRef;
use crate::types::{PrimKind, TypeRef};

/// Variable identifier, unique within one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub u32);

/// Label identifier, unique within one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u32);

/// Variable or parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub id: VarId,
    /// Source name; generated from the type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: TypeRef,
    /// Passed by reference (lambda `ref`/`out` parameters)
    #[serde(default)]
    pub by_ref: bool,
}

/// Jump target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelTarget {
    pub id: LabelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: TypeRef,
}

/// Cast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastKind {
    /// `(T)x`
    Convert,
    /// `checked((T)x)`
    ConvertChecked,
    /// `(T)x` from `object`
    Unbox,
}

/// Type test flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTestKind {
    /// `x is T`
    Is,
    /// `x as T`
    As,
    /// `x.GetType() == typeof(T)`
    TypeEqual,
}

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    // === Leaves ===
    /// Literal value
    Constant(Constant),
    /// Variable or parameter reference
    Variable(Variable),
    /// `default(T)`; `default(void)` is an empty statement
    Default(TypeRef),

    // === Operations ===
    /// Unary operation `-x`, `!x`, `x++`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        ty: TypeRef,
    },
    /// Binary operation `a + b`, `a[i]`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: TypeRef,
    },
    /// Assignment, simple or compound
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Conversion `(T)x`
    Cast {
        kind: CastKind,
        operand: Box<Expr>,
        ty: TypeRef,
    },
    /// Type test `x is T`, `x as T`
    TypeTest {
        kind: TypeTestKind,
        operand: Box<Expr>,
        ty: TypeRef,
    },

    // === Members and calls ===
    /// Method call; `subject` is absent for static and extension methods
    Call {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<Box<Expr>>,
        method: MemberRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// Delegate invocation
    Invoke {
        target: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        ty: TypeRef,
    },
    /// Property or field access; `subject` is absent for static members
    Member {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<Box<Expr>>,
        member: MemberRef,
    },
    /// Indexer access `x[a, b]`
    Index {
        subject: Box<Expr>,
        args: Vec<Expr>,
        ty: TypeRef,
    },

    // === Construction ===
    New(Box<NewObject>),
    NewArray(Box<NewArray>),
    Lambda(Box<Lambda>),
    /// Quoted lambda, rendered as the lambda itself
    Quote(Box<Expr>),

    // === Control flow ===
    Conditional(Box<Conditional>),
    Block(Box<Block>),
    Loop(Box<LoopExpr>),
    Switch(Box<Switch>),
    Try(Box<TryBlock>),
    /// `throw value;` or a rethrow `throw;` when the value is absent
    Throw {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Expr>>,
        ty: TypeRef,
    },
    Goto(Box<Goto>),
    Label(Box<LabelExpr>),

    // === Other ===
    Dynamic(Box<DynamicExpr>),
    /// Free-text comment
    Comment(String),
    DebugInfo(DebugInfo),
    /// Unknown node kind carried with a verbatim dump
    Extension(Box<Extension>),
}

/// Node kind discriminant, used for dispatch and custom translator predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NodeKind {
    Constant = 0,
    Variable = 1,
    Default = 2,
    Unary = 3,
    Binary = 4,
    Assign = 5,
    Cast = 6,
    TypeTest = 7,
    Call = 8,
    Invoke = 9,
    Member = 10,
    Index = 11,
    New = 12,
    NewArray = 13,
    Lambda = 14,
    Quote = 15,
    Conditional = 16,
    Block = 17,
    Loop = 18,
    Switch = 19,
    Try = 20,
    Throw = 21,
    Goto = 22,
    Label = 23,
    Dynamic = 24,
    Comment = 25,
    DebugInfo = 26,
    Extension = 27,
}

impl Expr {
    /// Node kind discriminant
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Constant(_) => NodeKind::Constant,
            Self::Variable(_) => NodeKind::Variable,
            Self::Default(_) => NodeKind::Default,
            Self::Unary { .. } => NodeKind::Unary,
            Self::Binary { .. } => NodeKind::Binary,
            Self::Assign { .. } => NodeKind::Assign,
            Self::Cast { .. } => NodeKind::Cast,
            Self::TypeTest { .. } => NodeKind::TypeTest,
            Self::Call { .. } => NodeKind::Call,
            Self::Invoke { .. } => NodeKind::Invoke,
            Self::Member { .. } => NodeKind::Member,
            Self::Index { .. } => NodeKind::Index,
            Self::New(_) => NodeKind::New,
            Self::NewArray(_) => NodeKind::NewArray,
            Self::Lambda(_) => NodeKind::Lambda,
            Self::Quote(_) => NodeKind::Quote,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Block(_) => NodeKind::Block,
            Self::Loop(_) => NodeKind::Loop,
            Self::Switch(_) => NodeKind::Switch,
            Self::Try(_) => NodeKind::Try,
            Self::Throw { .. } => NodeKind::Throw,
            Self::Goto(_) => NodeKind::Goto,
            Self::Label(_) => NodeKind::Label,
            Self::Dynamic(_) => NodeKind::Dynamic,
            Self::Comment(_) => NodeKind::Comment,
            Self::DebugInfo(_) => NodeKind::DebugInfo,
            Self::Extension(_) => NodeKind::Extension,
        }
    }

    /// Static type of the value this node produces
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Constant(c) => c.ty.clone(),
            Self::Variable(v) => v.ty.clone(),
            Self::Default(ty) => ty.clone(),
            Self::Unary { ty, .. }
            | Self::Binary { ty, .. }
            | Self::Cast { ty, .. }
            | Self::Invoke { ty, .. }
            | Self::Index { ty, .. }
            | Self::Throw { ty, .. } => ty.clone(),
            Self::Assign { target, .. } => target.ty(),
            Self::TypeTest { kind, ty, .. } => match kind {
                TypeTestKind::As => ty.clone(),
                TypeTestKind::Is | TypeTestKind::TypeEqual => TypeRef::BOOL,
            },
            Self::Call { method, .. } => method.member_type().cloned().unwrap_or(TypeRef::OBJECT),
            Self::Member { member, .. } => {
                member.member_type().cloned().unwrap_or(TypeRef::OBJECT)
            }
            Self::New(n) => n.ty.clone(),
            Self::NewArray(a) => a.array_type(),
            Self::Lambda(l) => l.delegate(),
            Self::Quote(inner) => inner.ty(),
            Self::Conditional(c) => c.ty.clone(),
            Self::Block(b) => b.result_type(),
            Self::Loop(l) => l
                .break_label
                .as_ref()
                .map_or(TypeRef::VOID, |label| label.ty.clone()),
            Self::Switch(s) => s.ty.clone(),
            Self::Try(t) => t.ty.clone(),
            Self::Goto(_) | Self::Comment(_) | Self::DebugInfo(_) => TypeRef::VOID,
            Self::Label(l) => l.target.ty.clone(),
            Self::Dynamic(d) => d.ty.clone(),
            Self::Extension(e) => e.ty.clone(),
        }
    }

    /// Is this `default(void)`, the empty statement?
    pub fn is_empty_statement(&self) -> bool {
        matches!(self, Self::Default(ty) if ty.is_void())
    }

    /// Does this node produce no value?
    pub fn is_void(&self) -> bool {
        self.ty().is_void()
    }

    /// Is this a lambda or quoted lambda?
    pub fn is_lambda(&self) -> bool {
        match self {
            Self::Lambda(_) => true,
            Self::Quote(inner) => inner.is_lambda(),
            _ => false,
        }
    }

    /// Does this node always transfer control away (return, throw, goto, break, continue)?
    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Throw { .. } | Self::Goto(_))
    }

    /// Is this a `null` constant?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Constant(c) if c.is_null())
    }

    /// Variable referenced by this node, if it is a bare variable
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Visit direct children in source order
    pub fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a Expr)) {
        match self {
            Self::Constant(_)
            | Self::Variable(_)
            | Self::Default(_)
            | Self::Comment(_)
            | Self::DebugInfo(_)
            | Self::Extension(_) => {}
            Self::Unary { operand, .. } | Self::Cast { operand, .. } | Self::TypeTest { operand, .. } => {
                f(operand)
            }
            Self::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            Self::Assign { target, value, .. } => {
                f(target);
                f(value);
            }
            Self::Call { subject, args, .. } => {
                if let Some(subject) = subject {
                    f(subject);
                }
                args.iter().for_each(f);
            }
            Self::Invoke { target, args, .. } => {
                f(target);
                args.iter().for_each(f);
            }
            Self::Member { subject, .. } => {
                if let Some(subject) = subject {
                    f(subject);
                }
            }
            Self::Index { subject, args, .. } => {
                f(subject);
                args.iter().for_each(f);
            }
            Self::New(n) => {
                n.args.iter().for_each(&mut f);
                for init in &n.initializers {
                    visit_initializer(init, &mut f);
                }
            }
            Self::NewArray(a) => match &a.init {
                super::nodes::ArrayInit::Elements(items) | super::nodes::ArrayInit::Bounds(items) => {
                    items.iter().for_each(f)
                }
            },
            Self::Lambda(l) => f(&l.body),
            Self::Quote(inner) => f(inner),
            Self::Conditional(c) => {
                f(&c.test);
                f(&c.if_true);
                if let Some(alt) = &c.if_false {
                    f(alt);
                }
            }
            Self::Block(b) => b.statements.iter().for_each(f),
            Self::Loop(l) => f(&l.body),
            Self::Switch(s) => {
                f(&s.value);
                for case in &s.cases {
                    case.tests.iter().for_each(&mut f);
                    f(&case.body);
                }
                if let Some(default) = &s.default {
                    f(default);
                }
            }
            Self::Try(t) => {
                f(&t.body);
                for handler in &t.handlers {
                    if let Some(filter) = &handler.filter {
                        f(filter);
                    }
                    f(&handler.body);
                }
                if let Some(fault) = &t.fault {
                    f(fault);
                }
                if let Some(finally) = &t.finally {
                    f(finally);
                }
            }
            Self::Throw { value, .. } => {
                if let Some(value) = value {
                    f(value);
                }
            }
            Self::Goto(g) => {
                if let Some(value) = &g.value {
                    f(value);
                }
            }
            Self::Label(l) => {
                if let Some(value) = &l.default_value {
                    f(value);
                }
            }
            Self::Dynamic(d) => d.args.iter().for_each(f),
        }
    }

    /// Count of nodes in this tree, including self
    pub fn node_count(&self) -> usize {
        let mut count = 1;
        self.for_each_child(|child| count += child.node_count());
        count
    }
}

fn visit_initializer<'a>(init: &'a super::nodes::Initializer, f: &mut impl FnMut(&'a Expr)) {
    use super::nodes::Initializer;
    match init {
        Initializer::Member { value, .. } => f(value),
        Initializer::Elements { args } => args.iter().for_each(|a| f(a)),
        Initializer::Nested { initializers, .. } => {
            for nested in initializers {
                visit_initializer(nested, f);
            }
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Expr {
    /// Constant node
    pub fn constant(c: Constant) -> Self {
        Self::Constant(c)
    }

    /// `int` constant
    pub fn int(v: i32) -> Self {
        Self::Constant(Constant::int(v))
    }

    /// `string` constant
    pub fn string(v: impl Into<String>) -> Self {
        Self::Constant(Constant::string(v))
    }

    /// `bool` constant
    pub fn bool(v: bool) -> Self {
        Self::Constant(Constant::bool(v))
    }

    /// `null` of a type
    pub fn null(ty: TypeRef) -> Self {
        Self::Constant(Constant::null(ty))
    }

    /// Variable reference
    pub fn var(v: &Variable) -> Self {
        Self::Variable(v.clone())
    }

    /// `default(void)`
    pub fn empty() -> Self {
        Self::Default(TypeRef::VOID)
    }

    /// `default(T)`
    pub fn default_of(ty: TypeRef) -> Self {
        Self::Default(ty)
    }

    /// Unary operation; the result type follows the operator
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        let ty = match op {
            UnaryOp::IsTrue | UnaryOp::IsFalse => TypeRef::BOOL,
            UnaryOp::ArrayLength => TypeRef::INT,
            _ => operand.ty(),
        };
        Self::Unary {
            op,
            operand: Box::new(operand),
            ty,
        }
    }

    /// Binary operation; comparisons and logical operators produce `bool`
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let ty = if op.is_comparison() || op.is_logical() {
            TypeRef::BOOL
        } else if op == BinaryOp::ArrayIndex {
            left.ty().element_type().cloned().unwrap_or(TypeRef::OBJECT)
        } else if op == BinaryOp::Power {
            TypeRef::DOUBLE
        } else {
            left.ty()
        };
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    /// `target = value`
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::compound_assign(AssignOp::Assign, target, value)
    }

    /// Compound assignment `target op= value`
    pub fn compound_assign(op: AssignOp, target: Expr, value: Expr) -> Self {
        Self::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// `(T)operand`
    pub fn convert(operand: Expr, ty: TypeRef) -> Self {
        Self::Cast {
            kind: CastKind::Convert,
            operand: Box::new(operand),
            ty,
        }
    }

    /// `checked((T)operand)`
    pub fn convert_checked(operand: Expr, ty: TypeRef) -> Self {
        Self::Cast {
            kind: CastKind::ConvertChecked,
            operand: Box::new(operand),
            ty,
        }
    }

    /// Type test
    pub fn type_test(kind: TypeTestKind, operand: Expr, ty: TypeRef) -> Self {
        Self::TypeTest {
            kind,
            operand: Box::new(operand),
            ty,
        }
    }

    /// Instance method call
    pub fn call(subject: Expr, method: impl Into<MemberRef>, args: Vec<Expr>) -> Self {
        Self::Call {
            subject: Some(Box::new(subject)),
            method: method.into(),
            args,
        }
    }

    /// Static or extension method call
    pub fn static_call(method: impl Into<MemberRef>, args: Vec<Expr>) -> Self {
        Self::Call {
            subject: None,
            method: method.into(),
            args,
        }
    }

    /// Delegate invocation
    pub fn invoke(target: Expr, args: Vec<Expr>) -> Self {
        let ty = match target.ty().as_named() {
            Some(named) if named.name == "Func" => {
                named.generic_args.last().cloned().unwrap_or(TypeRef::OBJECT)
            }
            Some(named) if named.name == "Action" => TypeRef::VOID,
            _ => TypeRef::OBJECT,
        };
        Self::Invoke {
            target: Box::new(target),
            args,
            ty,
        }
    }

    /// Instance property or field access
    pub fn member(subject: Expr, member: impl Into<MemberRef>) -> Self {
        Self::Member {
            subject: Some(Box::new(subject)),
            member: member.into(),
        }
    }

    /// Static property or field access
    pub fn static_member(member: impl Into<MemberRef>) -> Self {
        Self::Member {
            subject: None,
            member: member.into(),
        }
    }

    /// Array element `array[index]`
    pub fn array_index(array: Expr, index: Expr) -> Self {
        Self::binary(BinaryOp::ArrayIndex, array, index)
    }

    /// Block with result type taken from the final statement
    pub fn block(variables: Vec<Variable>, statements: Vec<Expr>) -> Self {
        Self::Block(Box::new(Block {
            variables,
            statements,
            ty: None,
        }))
    }

    /// Block whose value is discarded
    pub fn void_block(variables: Vec<Variable>, statements: Vec<Expr>) -> Self {
        Self::Block(Box::new(Block {
            variables,
            statements,
            ty: Some(TypeRef::VOID),
        }))
    }

    /// `test ? if_true : if_false`, typed by the consequent
    pub fn condition(test: Expr, if_true: Expr, if_false: Expr) -> Self {
        let ty = if_true.ty();
        Self::Conditional(Box::new(Conditional {
            test,
            if_true,
            if_false: Some(if_false),
            ty,
        }))
    }

    /// `if (test) { body }`
    pub fn if_then(test: Expr, body: Expr) -> Self {
        Self::Conditional(Box::new(Conditional {
            test,
            if_true: body,
            if_false: None,
            ty: TypeRef::VOID,
        }))
    }

    /// `if (test) { a } else { b }` as a statement
    pub fn if_then_else(test: Expr, if_true: Expr, if_false: Expr) -> Self {
        Self::Conditional(Box::new(Conditional {
            test,
            if_true,
            if_false: Some(if_false),
            ty: TypeRef::VOID,
        }))
    }

    /// Lambda with an inferred return type
    pub fn lambda(params: Vec<Variable>, body: Expr) -> Self {
        let return_type = body.ty();
        Self::Lambda(Box::new(Lambda {
            name: None,
            params,
            body,
            return_type,
            delegate_type: None,
        }))
    }

    /// `throw value;`
    pub fn throw(value: Expr) -> Self {
        Self::Throw {
            value: Some(Box::new(value)),
            ty: TypeRef::VOID,
        }
    }

    /// `throw;`
    pub fn rethrow() -> Self {
        Self::Throw {
            value: None,
            ty: TypeRef::VOID,
        }
    }

    /// Jump of the given kind
    pub fn jump(kind: GotoKind, target: &LabelTarget, value: Option<Expr>) -> Self {
        Self::Goto(Box::new(Goto {
            kind,
            target: target.clone(),
            value,
        }))
    }

    /// `goto label;`
    pub fn goto(target: &LabelTarget) -> Self {
        Self::jump(GotoKind::Goto, target, None)
    }

    /// `return value;` to a return label
    pub fn ret(target: &LabelTarget, value: Option<Expr>) -> Self {
        Self::jump(GotoKind::Return, target, value)
    }

    /// Label definition
    pub fn label(target: &LabelTarget, default_value: Option<Expr>) -> Self {
        Self::Label(Box::new(LabelExpr {
            target: target.clone(),
            default_value,
        }))
    }

    /// Comment node
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Is this an integral constant equal to `v`?
    pub fn is_int_constant(&self, v: i128) -> bool {
        matches!(
            self,
            Self::Constant(Constant { value: ConstantValue::Int(x), ty })
                if *x == v && ty.as_prim().is_some_and(PrimKind::is_integral)
        )
    }
}

impl From<Constant> for Expr {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<&Variable> for Expr {
    fn from(v: &Variable) -> Self {
        Self::Variable(v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::{MemberInfo, ParamInfo};

    fn var(id: u32, name: &str, ty: TypeRef) -> Variable {
        Variable {
            id: VarId(id),
            name: Some(name.into()),
            ty,
            by_ref: false,
        }
    }

    #[test]
    fn test_kinds_and_types() {
        let i = var(0, "i", TypeRef::INT);
        let sum = Expr::binary(BinaryOp::Add, Expr::var(&i), Expr::int(1));
        assert_eq!(sum.kind(), NodeKind::Binary);
        assert_eq!(sum.ty(), TypeRef::INT);

        let cmp = Expr::binary(BinaryOp::LessThan, Expr::var(&i), Expr::int(1));
        assert_eq!(cmp.ty(), TypeRef::BOOL);

        let test = Expr::type_test(TypeTestKind::Is, Expr::var(&i), TypeRef::LONG);
        assert_eq!(test.ty(), TypeRef::BOOL);
    }

    #[test]
    fn test_block_result_type() {
        let i = var(0, "i", TypeRef::INT);
        let block = Expr::block(vec![i.clone()], vec![Expr::assign(Expr::var(&i), Expr::int(1)), Expr::var(&i)]);
        assert_eq!(block.ty(), TypeRef::INT);
        assert!(Expr::block(vec![], vec![]).is_void());
        assert!(Expr::empty().is_empty_statement());
    }

    #[test]
    fn test_call_type_from_member() {
        let parse = MemberInfo::static_method(
            TypeRef::INT,
            "Parse",
            vec![ParamInfo::new("s", TypeRef::STRING)],
            TypeRef::INT,
        );
        let call = Expr::static_call(parse, vec![Expr::string("1")]);
        assert_eq!(call.ty(), TypeRef::INT);

        let missing = Expr::static_call(MemberRef::missing("Gone"), vec![]);
        assert_eq!(missing.ty(), TypeRef::OBJECT);
    }

    #[test]
    fn test_lambda_delegate_type() {
        let x = var(0, "x", TypeRef::INT);
        let lambda = Expr::lambda(vec![x.clone()], Expr::var(&x));
        assert_eq!(lambda.ty(), TypeRef::func(vec![TypeRef::INT, TypeRef::INT]));
        assert!(lambda.is_lambda());
    }

    #[test]
    fn test_node_count() {
        let i = var(0, "i", TypeRef::INT);
        let expr = Expr::binary(
            BinaryOp::Multiply,
            Expr::binary(BinaryOp::Add, Expr::var(&i), Expr::int(1)),
            Expr::int(2),
        );
        assert_eq!(expr.node_count(), 5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let i = var(3, "i", TypeRef::INT);
        let expr = Expr::if_then(
            Expr::binary(BinaryOp::GreaterThan, Expr::var(&i), Expr::int(0)),
            Expr::comment("positive"),
        );
        let json = serde_json::to_string(&expr).expect("serialize");
        let back: Expr = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(expr, back);
    }
}
