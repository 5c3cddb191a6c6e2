//! Switch statements.
//!
//! Each case lists its test values as `case` labels followed by the indented
//! body. A `break;` closes any body that does not already leave. Cases are
//! separated by blank lines and the default case comes last.

use readex_repr::{NodeKind, Switch};

use super::{BoxedTranslation, Position, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::TranslationSink;

struct SwitchArm {
    /// `case` values; empty for the default arm
    labels: Vec<BoxedTranslation>,
    body: BoxedTranslation,
}

impl SwitchArm {
    fn needs_break(&self) -> bool {
        !self.body.has_exit()
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        if self.labels.is_empty() {
            sink.write_control("default");
            sink.write_text(":");
        }
        for (index, label) in self.labels.iter().enumerate() {
            if index > 0 {
                sink.write_new_line();
            }
            sink.write_control("case");
            sink.write_text(" ");
            sink.write_translation(&**label);
            sink.write_text(":");
        }
        sink.indent();
        if !self.body.is_empty() {
            sink.write_new_line();
            sink.write_translation(&*self.body);
        }
        if self.needs_break() {
            sink.write_new_line();
            sink.write_control("break");
            sink.write_text(";");
        }
        sink.unindent();
    }
}

/// `switch (value) { case ...: }`
pub struct SwitchTranslation {
    value: BoxedTranslation,
    arms: Vec<SwitchArm>,
    has_default: bool,
    returns: bool,
    size: TranslationSize,
}

impl SwitchTranslation {
    /// Translate a switch in `position`
    pub fn new(node: &Switch, position: Position, ctx: &TranslationContext<'_>) -> Self {
        let returns = !node.ty.is_void() && matches!(position, Position::Body | Position::Return);
        let mut arms: Vec<SwitchArm> = node
            .cases
            .iter()
            .map(|case| SwitchArm {
                labels: case.tests.iter().map(|test| ctx.translate(test)).collect(),
                body: ctx.translate_body(&case.body, returns),
            })
            .collect();
        let default = node
            .default
            .as_ref()
            .filter(|default| !default.is_empty_statement());
        if let Some(default) = default {
            arms.push(SwitchArm {
                labels: Vec::new(),
                body: ctx.translate_body(default, returns),
            });
        }

        let mut translation = Self {
            value: ctx.translate(&node.value),
            arms,
            has_default: default.is_some(),
            returns,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for SwitchTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("switch");
        sink.write_text(" (");
        sink.write_translation(&*self.value);
        sink.write_text(")");
        sink.write_new_line();
        if self.arms.is_empty() {
            sink.write_text("{");
            sink.write_new_line();
            sink.write_text("}");
            return;
        }
        sink.write_opening_brace();
        for (index, arm) in self.arms.iter().enumerate() {
            if index > 0 {
                sink.write_blank_line();
            }
            arm.layout(sink);
        }
        sink.write_closing_brace();
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Switch)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.has_default && self.arms.iter().all(|arm| !arm.needs_break())
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
