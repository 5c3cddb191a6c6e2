//! Comments, debug markers and opaque extension nodes.

use readex_repr::{DebugInfo, Extension, NodeKind};
use tracing::warn;

use super::{Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// `// text`, one comment line per line of text
pub struct CommentTranslation {
    lines: Vec<String>,
    size: TranslationSize,
}

impl CommentTranslation {
    /// Translate comment text
    pub fn new(text: &str, ctx: &TranslationContext<'_>) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                let line = line.trim_end();
                if line.is_empty() {
                    "//".to_owned()
                } else {
                    format!("// {line}")
                }
            })
            .collect::<Vec<_>>();
        Self::from_lines(if lines.is_empty() { vec!["//".to_owned()] } else { lines }, ctx)
    }

    fn from_lines(lines: Vec<String>, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            lines,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for CommentTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                sink.write_new_line();
            }
            sink.write_token(line, TokenKind::Comment);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Comment)
    }

    fn is_terminated(&self) -> bool {
        true
    }
}

/// Source location marker, written as a comment
pub struct DebugInfoTranslation {
    comment: CommentTranslation,
}

impl DebugInfoTranslation {
    /// Translate a sequence point
    pub fn new(info: &DebugInfo, ctx: &TranslationContext<'_>) -> Self {
        let text = if info.clear {
            format!("// Clear debug info from {}", info.document)
        } else {
            format!(
                "// Debug to {}, {}, {} -> {}, {}",
                info.document, info.start_line, info.start_column, info.end_line, info.end_column
            )
        };
        Self {
            comment: CommentTranslation::from_lines(vec![text], ctx),
        }
    }
}

impl Translation for DebugInfoTranslation {
    fn size(&self) -> TranslationSize {
        self.comment.size()
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        self.comment.layout(sink);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::DebugInfo)
    }

    fn is_terminated(&self) -> bool {
        true
    }
}

/// A node kind with no translator, written as its textual dump
pub struct ExtensionTranslation {
    dump: String,
    size: TranslationSize,
}

impl ExtensionTranslation {
    /// Translate an opaque node
    pub fn new(extension: &Extension, ctx: &TranslationContext<'_>) -> Self {
        warn!(kind = %extension.kind, "no translator for node kind, writing its dump");
        let mut translation = Self {
            dump: extension.dump.clone(),
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for ExtensionTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_verbatim(&self.dump, TokenKind::Plain);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Extension)
    }
}
