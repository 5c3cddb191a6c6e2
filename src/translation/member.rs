//! Variables and member access.

use readex_repr::{precedence, Constant, ConstantValue, Expr, MemberRef, NodeKind, Variable};
use tracing::debug;

use super::{literal, BoxedTranslation, Parenthesized, Sequence, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// A variable or parameter name
#[derive(Debug, Clone)]
pub struct VariableTranslation {
    name: String,
    size: TranslationSize,
}

impl VariableTranslation {
    /// Translate a variable reference
    pub fn new(variable: &Variable, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            name: ctx.variable_name(variable).into_owned(),
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Rendered name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Translation for VariableTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_token(&self.name, TokenKind::Variable);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Variable)
    }
}

/// Translate a property or field read
///
/// Reads of a captured variable through a closure object render as the
/// variable itself, or as its captured value when configured.
pub fn translate_member_access(
    subject: Option<&Expr>,
    member: &MemberRef,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if let Some(Expr::Constant(closure)) = subject {
        if let Some(captured) = captured_value(closure, member) {
            return if ctx.settings().shows_captured_values() {
                literal::translate_constant(captured, ctx)
            } else {
                ctx.token(member.name(), TokenKind::Variable)
            };
        }
    }
    if member.is_missing() {
        debug!(member = member.name(), "rendering unresolved member by name");
    }

    let name = ctx.token(member.name(), TokenKind::Variable);
    let subject = match subject {
        Some(subject) => Some(Parenthesized::operand(
            ctx.translate(subject),
            precedence::PRIMARY,
            ctx,
        )),
        None => member.declaring_type().map(|ty| ctx.type_translation(ty)),
    };
    let parts = match subject {
        Some(subject) => vec![subject, ctx.plain("."), name],
        None => vec![name],
    };
    Sequence::new(parts, ctx).of_kind(NodeKind::Member).boxed()
}

fn captured_value<'c>(closure: &'c Constant, member: &MemberRef) -> Option<&'c Constant> {
    let is_closure =
        matches!(closure.value, ConstantValue::Closure(_)) || closure.ty.is_closure();
    if !is_closure {
        return None;
    }
    closure.captured(member.name()).map(|captured| &captured.value)
}
