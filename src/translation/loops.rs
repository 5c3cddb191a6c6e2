//! Loops.
//!
//! Tree loops are unconditional and exit through their break label, so they
//! are written as `while (true)` around the body.

use readex_repr::{LoopExpr, NodeKind};

use super::{BoxedTranslation, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::TranslationSink;

/// `while (true) { body }`
pub struct LoopTranslation {
    body: BoxedTranslation,
    size: TranslationSize,
}

impl LoopTranslation {
    /// Translate a loop
    pub fn new(node: &LoopExpr, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            body: ctx.translate_body(&node.body, false),
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for LoopTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("while");
        sink.write_text(" (");
        sink.write_keyword("true");
        sink.write_text(")");
        super::write_body(sink, &*self.body);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Loop)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn is_multi_statement(&self) -> bool {
        true
    }

    fn blank_line_before(&self) -> bool {
        true
    }

    fn blank_line_after(&self) -> bool {
        true
    }
}
