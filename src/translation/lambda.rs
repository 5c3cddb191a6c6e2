//! Lambdas.
//!
//! `x => body`, `(x, y) => body` or `() => body`. Parameter types are written
//! when configured, or when a parameter is passed by reference and so needs
//! its `ref` modifier. Bodies spanning several statements are braced on the
//! lines following the arrow.

use readex_repr::{precedence, Lambda, NodeKind, Variable};

use super::{BoxedTranslation, Position, Sequence, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// `(params) => body`
pub struct LambdaTranslation {
    params: Vec<BoxedTranslation>,
    parenthesized: bool,
    body: BoxedTranslation,
    braced: bool,
    size: TranslationSize,
}

impl LambdaTranslation {
    /// Translate a lambda
    pub fn new(lambda: &Lambda, ctx: &TranslationContext<'_>) -> Self {
        let settings = ctx.settings();
        let typed = settings.show_lambda_parameter_types
            || lambda.params.iter().any(|param| param.by_ref);
        let params: Vec<BoxedTranslation> = lambda
            .params
            .iter()
            .map(|param| parameter(param, typed, ctx))
            .collect();
        let body = ctx.translate_in(&lambda.body, Position::Body);
        let braced = body.is_empty() || body.is_multi_statement() || body.is_terminated();

        let mut translation = Self {
            parenthesized: typed || params.len() != 1,
            params,
            body,
            braced,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Is the body written as a braced block?
    pub fn is_braced(&self) -> bool {
        self.braced
    }
}

fn parameter(param: &Variable, typed: bool, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let discarded =
        ctx.settings().discard_unused_parameters && !ctx.analysis().is_used(param.id);
    let name = if discarded {
        ctx.plain("_")
    } else {
        ctx.token(&*ctx.variable_name(param), TokenKind::Variable)
    };
    if !typed {
        return name;
    }
    let mut parts = Vec::with_capacity(5);
    if param.by_ref {
        parts.push(ctx.keyword("ref"));
        parts.push(ctx.plain(" "));
    }
    parts.push(ctx.type_translation(&param.ty));
    parts.push(ctx.plain(" "));
    parts.push(name);
    Sequence::new(parts, ctx).boxed()
}

impl Translation for LambdaTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        if self.parenthesized {
            sink.write_text("(");
            super::write_separated(sink, &self.params, ", ");
            sink.write_text(")");
        } else {
            super::write_separated(sink, &self.params, "");
        }
        sink.write_text(" =>");
        if self.braced {
            super::write_body(sink, &*self.body);
        } else {
            sink.write_text(" ");
            sink.write_translation(&*self.body);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Lambda)
    }

    fn precedence(&self) -> u8 {
        precedence::ASSIGNMENT
    }

    fn needs_operand_parentheses(&self) -> bool {
        true
    }

    fn blank_line_before(&self) -> bool {
        self.braced
    }

    fn blank_line_after(&self) -> bool {
        self.braced
    }
}
