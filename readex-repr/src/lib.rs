//! readex code-tree representation
//!
//! This crate defines the immutable tree the readex renderer consumes: a
//! tagged union of code constructs (operators, literals, control flow,
//! declarations, calls, object construction), the type references those
//! constructs carry, and the member-description capability the renderer uses
//! to ask about methods, properties and fields.
//!
//! # Format Overview
//! - In memory: [`Expr`] trees built by a metaprogramming or query-building layer
//! - On disk: versioned JSON documents ([`TreeDocument`]) for tooling and tests

pub mod expr;
pub mod members;
pub mod types;
mod api;
mod error;

pub use api::{from_json_str, read_tree, to_json_string, write_tree, TreeDocument, FORMAT_VERSION};
pub use error::{ReprError, ReprResult};
pub use expr::{
    ArrayInit, AssignOp, BinaryOp, Block, CapturedValue, CastKind, CatchHandler, Conditional,
    Constant, ConstantValue, DateTimeValue, DebugInfo, DynamicExpr, DynamicOperation, Expr, ExprBuilder, Extension,
    FloatBits, FloatPrec, Goto, GotoKind, Initializer, LabelExpr, LabelId, LabelTarget, Lambda,
    LoopExpr, NewArray, NewObject, NodeKind, Switch, SwitchCase, TryBlock, TypeTestKind, UnaryOp,
    VarId, Variable, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};
pub use expr::precedence;
pub use members::{DescribeMember, MemberInfo, MemberKind, MemberRef, ParamInfo, ParamModifier};
pub use types::{EnumInfo, EnumMember, NamedType, PrimKind, TypeKind, TypeRef, SYSTEM_NAMESPACE};
