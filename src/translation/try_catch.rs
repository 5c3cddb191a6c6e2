//! Exception handling.
//!
//! `try` with its handlers, then `fault` and `finally` clauses. A handler
//! names its variable only when the body reads it, and its exception type
//! only when that is narrower than the root exception type, so a catch-all
//! handler renders as a bare `catch`.

use readex_repr::{CatchHandler, NodeKind, TryBlock};

use super::{BoxedTranslation, Position, Sequence, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

struct Handler {
    declaration: Option<BoxedTranslation>,
    filter: Option<BoxedTranslation>,
    body: BoxedTranslation,
}

impl Handler {
    fn new(handler: &CatchHandler, returns: bool, ctx: &TranslationContext<'_>) -> Self {
        let variable = handler
            .variable
            .as_ref()
            .filter(|variable| ctx.analysis().is_used(variable.id));
        let declaration = match variable {
            Some(variable) => Some(
                Sequence::new(
                    vec![
                        ctx.type_translation(&handler.exception_type),
                        ctx.plain(" "),
                        ctx.token(&*ctx.variable_name(variable), TokenKind::Variable),
                    ],
                    ctx,
                )
                .boxed(),
            ),
            None if !handler.exception_type.is_root_exception() => {
                Some(ctx.type_translation(&handler.exception_type))
            }
            None => None,
        };
        Self {
            declaration,
            filter: handler.filter.as_ref().map(|filter| ctx.translate(filter)),
            body: ctx.translate_body(&handler.body, returns),
        }
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("catch");
        if let Some(declaration) = &self.declaration {
            sink.write_text(" (");
            sink.write_translation(&**declaration);
            sink.write_text(")");
        }
        if let Some(filter) = &self.filter {
            sink.write_text(" ");
            sink.write_control("when");
            sink.write_text(" (");
            sink.write_translation(&**filter);
            sink.write_text(")");
        }
        super::write_body(sink, &*self.body);
    }
}

/// `try { } catch { } finally { }`
pub struct TryTranslation {
    body: BoxedTranslation,
    handlers: Vec<Handler>,
    fault: Option<BoxedTranslation>,
    finally: Option<BoxedTranslation>,
    returns: bool,
    size: TranslationSize,
}

impl TryTranslation {
    /// Translate a try block in `position`
    pub fn new(node: &TryBlock, position: Position, ctx: &TranslationContext<'_>) -> Self {
        let returns = !node.ty.is_void() && matches!(position, Position::Body | Position::Return);
        let mut translation = Self {
            body: ctx.translate_body(&node.body, returns),
            handlers: node
                .handlers
                .iter()
                .map(|handler| Handler::new(handler, returns, ctx))
                .collect(),
            fault: node.fault.as_ref().map(|fault| ctx.translate_body(fault, false)),
            finally: node
                .finally
                .as_ref()
                .map(|finally| ctx.translate_body(finally, false)),
            returns,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for TryTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("try");
        super::write_body(sink, &*self.body);
        for handler in &self.handlers {
            sink.write_new_line();
            handler.layout(sink);
        }
        if let Some(fault) = &self.fault {
            sink.write_new_line();
            sink.write_control("fault");
            super::write_body(sink, &**fault);
        }
        if let Some(finally) = &self.finally {
            sink.write_new_line();
            sink.write_control("finally");
            super::write_body(sink, &**finally);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Try)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.body.has_exit() && self.handlers.iter().all(|handler| handler.body.has_exit())
    }

    fn is_multi_statement(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        self.returns
    }

    fn blank_line_before(&self) -> bool {
        true
    }

    fn blank_line_after(&self) -> bool {
        true
    }
}
