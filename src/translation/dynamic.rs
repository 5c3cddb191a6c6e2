//! Late-bound operations.
//!
//! Each operation is written as the statically-bound code it stands for:
//! `target.Name`, `target.Name(args)`, `target[index] = value` and so on.
//! Binders known only by a textual description such as `GetMember Name` are
//! parsed back into an operation first. Anything that cannot be recognised,
//! or whose arguments do not fit the operation, is written as its
//! description.

use readex_repr::{precedence, DynamicExpr, DynamicOperation, Expr, NodeKind};
use tracing::warn;

use super::parameters::ArgumentList;
use super::{call, cast, operators, BoxedTranslation, Parenthesized, Sequence};
use crate::context::TranslationContext;
use crate::writer::TokenKind;

/// Translate a late-bound operation
pub fn translate_dynamic(node: &DynamicExpr, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let translated = match &node.operation {
        DynamicOperation::Described(text) => parse_description(text)
            .and_then(|operation| translate_operation(&operation, &node.args, ctx)),
        operation => translate_operation(operation, &node.args, ctx),
    };
    translated.unwrap_or_else(|| {
        let description = match &node.operation {
            DynamicOperation::Described(text) => text.clone(),
            operation => format!("{operation:?}"),
        };
        warn!(
            operation = %description,
            args = node.args.len(),
            "unrecognised dynamic operation, writing its description"
        );
        ctx.token(description, TokenKind::Plain)
    })
}

/// Recover an operation from a binder description like `GetMember Name`
pub fn parse_description(text: &str) -> Option<DynamicOperation> {
    let mut words = text.split_whitespace();
    let verb = words.next()?;
    let name = words.next();
    if words.next().is_some() {
        return None;
    }
    let operation = match (verb, name) {
        ("GetMember", Some(name)) => DynamicOperation::GetMember { name: name.to_owned() },
        ("SetMember", Some(name)) => DynamicOperation::SetMember { name: name.to_owned() },
        ("InvokeMember" | "Call", Some(name)) => DynamicOperation::InvokeMember {
            name: name.to_owned(),
            generic_args: Vec::new(),
        },
        ("Invoke", None) => DynamicOperation::Invoke,
        ("GetIndex", None) => DynamicOperation::GetIndex,
        ("SetIndex", None) => DynamicOperation::SetIndex,
        _ => return None,
    };
    Some(operation)
}

fn translate_operation(
    operation: &DynamicOperation,
    args: &[Expr],
    ctx: &TranslationContext<'_>,
) -> Option<BoxedTranslation> {
    let translation = match (operation, args) {
        (DynamicOperation::GetMember { name }, [receiver]) => {
            Sequence::new(member_access(receiver, name, ctx), ctx)
                .of_kind(NodeKind::Dynamic)
                .boxed()
        }
        (DynamicOperation::SetMember { name }, [receiver, value]) => {
            let mut parts = member_access(receiver, name, ctx);
            parts.push(ctx.plain(" = "));
            parts.push(ctx.translate(value));
            assignment(parts, ctx)
        }
        (DynamicOperation::InvokeMember { name, generic_args }, [receiver, rest @ ..]) => {
            let mut parts = member_access(receiver, name, ctx);
            if !generic_args.is_empty() {
                parts.push(ctx.plain("<"));
                for (index, ty) in generic_args.iter().enumerate() {
                    if index > 0 {
                        parts.push(ctx.plain(", "));
                    }
                    parts.push(ctx.type_translation(ty));
                }
                parts.push(ctx.plain(">"));
            }
            parts.push(argument_list(&parts, rest, ctx));
            Sequence::new(parts, ctx).of_kind(NodeKind::Dynamic).boxed()
        }
        (DynamicOperation::Invoke, [target, rest @ ..]) => {
            let mut parts = vec![Parenthesized::operand(
                ctx.translate(target),
                precedence::PRIMARY,
                ctx,
            )];
            parts.push(argument_list(&parts, rest, ctx));
            Sequence::new(parts, ctx).of_kind(NodeKind::Dynamic).boxed()
        }
        (DynamicOperation::GetIndex, [receiver, indexes @ ..]) if !indexes.is_empty() => {
            index(receiver, indexes, ctx)
        }
        (DynamicOperation::SetIndex, [receiver, indexes @ .., value]) if !indexes.is_empty() => {
            assignment(
                vec![index(receiver, indexes, ctx), ctx.plain(" = "), ctx.translate(value)],
                ctx,
            )
        }
        (DynamicOperation::Convert { ty }, [operand]) => {
            cast::cast_translation(ctx.translate(operand), ty, ctx)
        }
        (DynamicOperation::Unary(op), [operand]) => operators::translate_unary(*op, operand, ctx),
        (DynamicOperation::Binary(op), [left, right]) => {
            operators::translate_binary(*op, left, right, ctx)
        }
        _ => return None,
    };
    Some(translation)
}

fn member_access(
    receiver: &Expr,
    name: &str,
    ctx: &TranslationContext<'_>,
) -> Vec<BoxedTranslation> {
    vec![
        Parenthesized::operand(ctx.translate(receiver), precedence::PRIMARY, ctx),
        ctx.plain("."),
        ctx.token(name, TokenKind::Variable),
    ]
}

fn argument_list(
    prefix: &[BoxedTranslation],
    args: &[Expr],
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let prefix_len = prefix.iter().map(|part| part.len()).sum();
    let args = args.iter().map(|arg| ctx.translate(arg)).collect();
    Box::new(ArgumentList::new(args, prefix_len, ctx))
}

fn index(receiver: &Expr, indexes: &[Expr], ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let indexes = indexes.iter().map(|index| ctx.translate(index)).collect();
    call::index_translation(ctx.translate(receiver), indexes, ctx)
}

fn assignment(parts: Vec<BoxedTranslation>, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    Sequence::new(parts, ctx)
        .with_precedence(precedence::ASSIGNMENT)
        .parenthesized_as_operand()
        .of_kind(NodeKind::Dynamic)
        .boxed()
}
