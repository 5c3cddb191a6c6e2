//! Readable source text from immutable code trees.
//!
//! `readex` renders a [`readex_repr::Expr`] tree as brace-delimited,
//! semicolon-terminated C#-style source, choosing parentheses, line breaks,
//! blank lines, declarations and `return` placement the way a developer
//! would have written the code by hand.
//!
//! # Architecture
//!
//! - [`analysis`] - one read-only walk collecting facts translators need
//! - [`translation`] - per-node translations, sized before they are written
//! - [`context`] - dispatch from node kind to translator
//! - [`writer`] - the output buffer, its lookback queries and token formatters
//! - [`settings`] / [`config`] - runtime options and their `.readex.toml` form
//!
//! # Example
//!
//! ```
//! use readex::translate;
//! use readex_repr::{BinaryOp, Expr, ExprBuilder, TypeRef};
//!
//! let mut b = ExprBuilder::new();
//! let x = b.variable("x", TypeRef::INT);
//! let body = Expr::binary(BinaryOp::Multiply, Expr::var(&x), Expr::int(2));
//! let lambda = Expr::lambda(vec![x], body);
//!
//! assert_eq!(translate(&lambda).as_deref(), Some("x => x * 2"));
//! ```

pub mod analysis;
pub mod config;
pub mod context;
pub mod error;
pub mod settings;
pub mod translation;
pub mod type_names;
pub mod writer;

pub use config::{
    discover_and_load_config, discover_config, OutputFormat, RenderConfig, CONFIG_FILE_NAME,
};
pub use context::TranslationContext;
pub use error::{ReadexError, Result};
pub use settings::TranslationSettings;
pub use translation::{BoxedTranslation, Position, Translation, TranslationSize};
pub use writer::{AnsiFormatter, FormattedOutput, HtmlFormatter, TokenFormatter, TokenKind};

use readex_repr::Expr;
use tracing::debug;

use writer::TranslationWriter;

/// Render `root` with default settings
///
/// Returns `None` when the tree reduces to nothing visible, such as an empty
/// block or a lone `default(void)`.
pub fn translate(root: &Expr) -> Option<String> {
    translate_with(root, &TranslationSettings::default())
}

/// Render `root` with `settings`
pub fn translate_with(root: &Expr, settings: &TranslationSettings) -> Option<String> {
    translate_formatted(root, settings).map(|output| output.plain)
}

/// Render `root`, also producing styled text and classified tokens when
/// `settings` carries a formatter
pub fn translate_formatted(root: &Expr, settings: &TranslationSettings) -> Option<FormattedOutput> {
    let ctx = TranslationContext::new(root, settings);
    let translation = ctx.translate_in(root, Position::Body);
    if translation.is_empty() {
        debug!(kind = ?root.kind(), "tree renders to nothing");
        return None;
    }

    let size = translation.size();
    let mut writer = TranslationWriter::new(settings.indent(), settings.formatter(), size.len);
    translation.write(&mut writer);
    let output = writer.into_output();
    debug!(
        kind = ?root.kind(),
        len = size.len,
        lines = size.lines,
        weight = size.weight,
        "rendered tree"
    );
    Some(output)
}
