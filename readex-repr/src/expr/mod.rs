//! Expression and statement nodes

mod builder;
mod expression;
mod literal;
mod nodes;
mod operators;

pub use builder::ExprBuilder;
pub use expression::{CastKind, Expr, LabelId, LabelTarget, NodeKind, TypeTestKind, VarId, Variable};
pub use literal::{
    CapturedValue, Constant, ConstantValue, DateTimeValue, FloatBits, FloatPrec,
    TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
pub use nodes::{
    ArrayInit, Block, CatchHandler, Conditional, DebugInfo, DynamicExpr, DynamicOperation,
    Extension, Goto, GotoKind, Initializer, LabelExpr, Lambda, LoopExpr, NewArray, NewObject,
    Switch, SwitchCase, TryBlock,
};
pub use operators::{precedence, AssignOp, BinaryOp, UnaryOp};
