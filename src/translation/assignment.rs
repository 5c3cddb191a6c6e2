//! Assignments.
//!
//! `x = value`, compound `x += value`, and the first assignment of a block
//! variable declaring it inline as `var x = value`. Operators with no
//! compound form are expanded: `x = Math.Pow(x, y)`, `x = checked(x + y)`.

use readex_repr::{precedence, AssignOp, Expr, NodeKind};

use super::operators::{math_pow, BinaryTranslation, CheckedTranslation};
use super::{block, BoxedTranslation, Sequence};
use crate::context::TranslationContext;
use crate::writer::TokenKind;

/// Translate an assignment node
pub fn translate_assignment(
    node: &Expr,
    op: AssignOp,
    target: &Expr,
    value: &Expr,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if let Expr::Block(inner) = value {
        if inner.statements.len() > 1 {
            return block::translate_assigned_block(value, inner, target, op, ctx);
        }
    }
    let declares = ctx.analysis().declared_by(node).is_some();
    assign_translated(target, op, ctx.translate(value), value, declares, ctx)
}

/// Assign an already-translated value to `target`
pub(crate) fn assign_translated(
    target: &Expr,
    op: AssignOp,
    value: BoxedTranslation,
    value_node: &Expr,
    declares: bool,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    // A braced lambda value sets the statement apart
    let spaced = value.blank_line_before() || value.blank_line_after();
    let mut parts = Vec::with_capacity(5);
    if declares {
        let explicit = !ctx.settings().uses_implicit_type_names()
            || value_node.is_null()
            || value_node.is_lambda();
        parts.push(if explicit {
            ctx.type_translation(&target.ty())
        } else {
            ctx.keyword("var")
        });
        parts.push(ctx.plain(" "));
    }
    parts.push(ctx.translate(target));

    match (op, op.binary_op()) {
        (AssignOp::PowerAssign, _) => {
            parts.push(ctx.plain(" = "));
            parts.push(math_pow(ctx.translate(target), value, ctx));
        }
        (op, Some(binary)) if op.is_checked() => {
            let combined =
                BinaryTranslation::new(binary.unchecked(), ctx.translate(target), value, ctx);
            parts.push(ctx.plain(" = "));
            parts.push(Box::new(CheckedTranslation::new(
                Box::new(combined),
                Vec::new(),
                ctx,
            )));
        }
        (op, _) => {
            parts.push(ctx.plain(" "));
            parts.push(ctx.token(op.symbol(), TokenKind::Plain));
            parts.push(ctx.plain(" "));
            parts.push(value);
        }
    }

    Sequence::new(parts, ctx)
        .with_precedence(precedence::ASSIGNMENT)
        .parenthesized_as_operand()
        .of_kind(NodeKind::Assign)
        .spaced(spaced)
        .boxed()
}
