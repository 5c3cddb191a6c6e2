//! Output sinks shared by measuring and writing.
//!
//! Every translation lays itself out against a [`TranslationSink`]. At
//! construction the sink is a [`Measure`], which only counts; at write time
//! it is the real [`TranslationWriter`](super::TranslationWriter). Running
//! the same layout code against both is what keeps `len` exact.

use crate::translation::{Translation, TranslationSize};

use super::formatter::{TokenFormatter, TokenKind};

/// Destination for a translation's layout
pub trait TranslationSink {
    /// Emit classified text on the current line
    fn write_token(&mut self, text: &str, kind: TokenKind);

    /// Emit text whose embedded newlines are kept verbatim, without indentation
    fn write_verbatim(&mut self, text: &str, kind: TokenKind);

    /// End the current line
    fn write_new_line(&mut self);

    /// Increase indentation for subsequent lines
    fn indent(&mut self);

    /// Decrease indentation for subsequent lines
    fn unindent(&mut self);

    /// Emit a child translation at the current position
    fn write_translation(&mut self, translation: &dyn Translation);

    /// Does the output end with a line break?
    fn ends_with_new_line(&self) -> bool;

    /// Does the output end with an empty line?
    fn ends_with_blank_line(&self) -> bool;

    /// Emit unclassified text
    fn write_text(&mut self, text: &str) {
        self.write_token(text, TokenKind::Plain);
    }

    fn write_keyword(&mut self, keyword: &str) {
        self.write_token(keyword, TokenKind::Keyword);
    }

    fn write_control(&mut self, keyword: &str) {
        self.write_token(keyword, TokenKind::ControlStatement);
    }

    /// Start a new line unless already at one
    fn ensure_new_line(&mut self) {
        if !self.ends_with_new_line() {
            self.write_new_line();
        }
    }

    /// Make the output end with exactly one empty line
    fn write_blank_line(&mut self) {
        if self.ends_with_blank_line() {
            return;
        }
        self.ensure_new_line();
        self.write_new_line();
    }

    /// `{`, line break, indent
    fn write_opening_brace(&mut self) {
        self.write_text("{");
        self.write_new_line();
        self.indent();
    }

    /// Unindent, line break, `}`
    fn write_closing_brace(&mut self) {
        self.unindent();
        self.write_new_line();
        self.write_text("}");
    }

    /// Write `body` between braces on its own lines
    fn write_braced(&mut self, body: &dyn Translation) {
        if body.is_empty() {
            self.write_text("{");
            self.write_new_line();
            self.write_text("}");
            return;
        }
        self.write_opening_brace();
        self.write_translation(body);
        self.write_closing_brace();
    }
}

/// Sink that only measures
///
/// `len` counts every character as if written at depth zero; `lines` counts
/// non-empty lines after the first, each of which a parent will indent
/// further when it places this translation deeper.
pub struct Measure<'f> {
    unit_len: usize,
    formatter: Option<&'f dyn TokenFormatter>,
    depth: usize,
    pending_indent: bool,
    trailing_newlines: usize,
    size: TranslationSize,
}

impl<'f> Measure<'f> {
    /// Create a measuring sink
    pub fn new(unit_len: usize, formatter: Option<&'f dyn TokenFormatter>) -> Self {
        Self {
            unit_len,
            formatter,
            depth: 0,
            pending_indent: false,
            trailing_newlines: 0,
            size: TranslationSize::default(),
        }
    }

    /// Measured size
    pub fn finish(self) -> TranslationSize {
        self.size
    }

    fn start_line(&mut self) {
        if self.pending_indent {
            self.size.len += self.depth * self.unit_len;
            self.size.lines += 1;
            self.pending_indent = false;
        }
        self.trailing_newlines = 0;
    }
}

impl TranslationSink for Measure<'_> {
    fn write_token(&mut self, text: &str, kind: TokenKind) {
        if text.is_empty() {
            return;
        }
        self.start_line();
        self.size.len += text.chars().count();
        if let Some(formatter) = self.formatter {
            self.size.weight += formatter.weight(text, kind);
        }
    }

    fn write_verbatim(&mut self, text: &str, kind: TokenKind) {
        self.write_token(text, kind);
        if text.ends_with('\n') {
            self.trailing_newlines = 1;
        }
    }

    fn write_new_line(&mut self) {
        self.size.len += 1;
        self.pending_indent = true;
        self.trailing_newlines += 1;
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn write_translation(&mut self, translation: &dyn Translation) {
        let child = translation.size();
        if child.len == 0 {
            return;
        }
        self.start_line();
        self.size.len += child.len + child.lines * self.depth * self.unit_len;
        self.size.lines += child.lines;
        self.size.weight += child.weight;
    }

    fn ends_with_new_line(&self) -> bool {
        self.trailing_newlines >= 1
    }

    fn ends_with_blank_line(&self) -> bool {
        self.trailing_newlines >= 2
    }
}
