//! Token classification and styled output.
//!
//! Every piece of text the writer emits is classified with a [`TokenKind`].
//! A [`TokenFormatter`] turns classified tokens into styled text (HTML spans,
//! terminal colours). The extra characters a formatter adds are the
//! translation's *formatting weight*: styled output is always exactly
//! `len + weight` characters long.

use std::fmt::Write as _;

/// Syntax classification of an emitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Punctuation, operators, whitespace
    Plain,
    /// Language keyword (`new`, `var`, `typeof`, `null`)
    Keyword,
    /// Control statement keyword (`if`, `return`, `throw`, `switch`)
    ControlStatement,
    /// Class, struct, enum or delegate name
    TypeName,
    /// Interface name
    InterfaceName,
    /// Method name at a call site
    MethodName,
    /// Variable, parameter, property or field name
    Variable,
    /// String or character literal
    StringLiteral,
    /// Numeric literal
    NumericLiteral,
    /// Comment text
    Comment,
}

impl TokenKind {
    /// CSS class used by the HTML formatter
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Keyword => "kw",
            Self::ControlStatement => "cs",
            Self::TypeName => "tn",
            Self::InterfaceName => "in",
            Self::MethodName => "mn",
            Self::Variable => "vb",
            Self::StringLiteral => "st",
            Self::NumericLiteral => "nm",
            Self::Comment => "cm",
        }
    }
}

/// Pluggable sink for styled output
///
/// `weight` must equal the number of characters `write_token` adds beyond
/// `text` itself, so lengths stay exact.
pub trait TokenFormatter: Send + Sync {
    /// Append a styled token to `out`
    fn write_token(&self, out: &mut String, text: &str, kind: TokenKind);

    /// Extra characters `write_token` produces for this token
    fn weight(&self, text: &str, kind: TokenKind) -> usize;
}

// ============================================================================
// HTML
// ============================================================================

/// Wraps classified tokens in `<span class="...">` and escapes markup
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

fn html_escape_extra(c: char) -> usize {
    match c {
        '&' => 4,       // &amp;
        '<' | '>' => 3, // &lt; &gt;
        '"' => 5,       // &quot;
        _ => 0,
    }
}

fn push_html_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl TokenFormatter for HtmlFormatter {
    fn write_token(&self, out: &mut String, text: &str, kind: TokenKind) {
        if kind == TokenKind::Plain {
            push_html_escaped(out, text);
            return;
        }
        let _ = write!(out, "<span class=\"{}\">", kind.css_class());
        push_html_escaped(out, text);
        out.push_str("</span>");
    }

    fn weight(&self, text: &str, kind: TokenKind) -> usize {
        let escaping: usize = text.chars().map(html_escape_extra).sum();
        if kind == TokenKind::Plain {
            return escaping;
        }
        // <span class=""> plus </span>
        let markup = "<span class=\"\">".len() + kind.css_class().len() + "</span>".len();
        markup + escaping
    }
}

// ============================================================================
// ANSI
// ============================================================================

/// Terminal colour codes
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BRIGHT_BLUE: &str = "\x1b[94m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Colours classified tokens with ANSI escape sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiFormatter;

impl AnsiFormatter {
    const fn color(kind: TokenKind) -> Option<&'static str> {
        match kind {
            TokenKind::Plain => None,
            TokenKind::Keyword => Some(colors::BLUE),
            TokenKind::ControlStatement => Some(colors::MAGENTA),
            TokenKind::TypeName => Some(colors::CYAN),
            TokenKind::InterfaceName => Some(colors::BRIGHT_GREEN),
            TokenKind::MethodName => Some(colors::YELLOW),
            TokenKind::Variable => Some(colors::BRIGHT_BLUE),
            TokenKind::StringLiteral => Some(colors::GREEN),
            TokenKind::NumericLiteral => Some(colors::BRIGHT_GREEN),
            TokenKind::Comment => Some(colors::GRAY),
        }
    }
}

impl TokenFormatter for AnsiFormatter {
    fn write_token(&self, out: &mut String, text: &str, kind: TokenKind) {
        match Self::color(kind) {
            Some(color) => {
                out.push_str(color);
                out.push_str(text);
                out.push_str(colors::RESET);
            }
            None => out.push_str(text),
        }
    }

    fn weight(&self, _text: &str, kind: TokenKind) -> usize {
        Self::color(kind).map_or(0, |color| {
            color.chars().count() + colors::RESET.chars().count()
        })
    }
}
