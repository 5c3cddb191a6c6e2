//! Formatting writer.
//!
//! The writer owns the append-only output buffer for one top-level translate
//! call. It tracks indentation depth and whether the next line still needs
//! its indentation, records classified tokens for styled output, and answers
//! lookback queries so sibling translations can coordinate blank lines
//! without shared flags.

mod formatter;
mod sink;

pub use formatter::{colors, AnsiFormatter, HtmlFormatter, TokenFormatter, TokenKind};
pub use sink::{Measure, TranslationSink};

use crate::translation::Translation;

/// Rendered output with optional styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedOutput {
    /// Plain text
    pub plain: String,
    /// Text styled by the configured formatter
    pub styled: Option<String>,
    /// Classified tokens; concatenated, they reproduce `plain`
    pub tokens: Vec<(String, TokenKind)>,
}

/// Streaming writer for a fully built translation tree
pub struct TranslationWriter<'a> {
    indent_unit: &'a str,
    formatter: Option<&'a dyn TokenFormatter>,
    plain: String,
    styled: Option<String>,
    tokens: Vec<(String, TokenKind)>,
    depth: usize,
    pending_indent: bool,
}

impl<'a> TranslationWriter<'a> {
    /// Create a writer sized for `capacity` characters
    pub fn new(
        indent_unit: &'a str,
        formatter: Option<&'a dyn TokenFormatter>,
        capacity: usize,
    ) -> Self {
        Self {
            indent_unit,
            formatter,
            plain: String::with_capacity(capacity),
            styled: formatter.map(|_| String::with_capacity(capacity * 2)),
            tokens: Vec::new(),
            depth: 0,
            pending_indent: false,
        }
    }

    /// Plain text written so far
    pub fn as_str(&self) -> &str {
        &self.plain
    }

    /// Does the output end with `suffix`?
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.plain.ends_with(suffix)
    }

    /// Does the output end with `c`?
    pub fn ends_with_char(&self, c: char) -> bool {
        self.plain.ends_with(c)
    }

    /// Current indentation depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Finish and return the plain text
    pub fn finish(self) -> String {
        self.plain
    }

    /// Finish and return plain text, styled text and tokens
    pub fn into_output(self) -> FormattedOutput {
        FormattedOutput {
            plain: self.plain,
            styled: self.styled,
            tokens: self.tokens,
        }
    }

    fn emit(&mut self, text: &str, kind: TokenKind) {
        self.plain.push_str(text);
        if let (Some(formatter), Some(styled)) = (self.formatter, self.styled.as_mut()) {
            formatter.write_token(styled, text, kind);
            match self.tokens.last_mut() {
                Some((last, TokenKind::Plain)) if kind == TokenKind::Plain => last.push_str(text),
                _ => self.tokens.push((text.to_owned(), kind)),
            }
        }
    }

    fn start_line(&mut self) {
        if !self.pending_indent {
            return;
        }
        self.pending_indent = false;
        for _ in 0..self.depth {
            let unit = self.indent_unit;
            self.emit(unit, TokenKind::Plain);
        }
    }
}

impl TranslationSink for TranslationWriter<'_> {
    fn write_token(&mut self, text: &str, kind: TokenKind) {
        if text.is_empty() {
            return;
        }
        self.start_line();
        self.emit(text, kind);
    }

    fn write_verbatim(&mut self, text: &str, kind: TokenKind) {
        self.write_token(text, kind);
    }

    fn write_new_line(&mut self) {
        self.emit("\n", TokenKind::Plain);
        self.pending_indent = true;
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn write_translation(&mut self, translation: &dyn Translation) {
        translation.layout(self);
    }

    fn ends_with_new_line(&self) -> bool {
        self.plain.ends_with('\n')
    }

    fn ends_with_blank_line(&self) -> bool {
        self.plain.ends_with("\n\n")
    }
}
