//! Runtime translation settings.
//!
//! [`TranslationSettings`] is the options object every translate call takes.
//! Plain options can also come from a `.readex.toml` file through
//! [`RenderConfig`](crate::config::RenderConfig); closures (anonymous type
//! naming, custom translators) and formatters are only settable in code.
//!
//! ```
//! use readex::TranslationSettings;
//!
//! let settings = TranslationSettings::default()
//!     .indent_using("\t")
//!     .use_explicit_type_names()
//!     .wrap_lines_at(80);
//! assert_eq!(settings.line_wrap_threshold(), 80);
//! ```

use std::fmt;
use std::sync::Arc;

use readex_repr::{Expr, TypeRef};

use crate::context::TranslationContext;
use crate::translation::Translation;
use crate::writer::TokenFormatter;

/// Default indentation unit
pub const DEFAULT_INDENT: &str = "    ";

/// Default line length above which lists and ternaries wrap
pub const DEFAULT_LINE_WRAP_THRESHOLD: usize = 100;

/// Names anonymous types for display
pub type AnonymousTypeNamer = Arc<dyn Fn(&TypeRef) -> String + Send + Sync>;

/// Decides whether a custom translator handles a node
pub type NodePredicate = Arc<dyn Fn(&Expr) -> bool + Send + Sync>;

/// Builds a translation for a node the predicate accepted
pub type TranslatorFactory =
    Arc<dyn Fn(&Expr, &TranslationContext<'_>) -> Box<dyn Translation> + Send + Sync>;

/// A (predicate, factory) override consulted before the built-in translators
#[derive(Clone)]
pub struct CustomTranslator {
    pub predicate: NodePredicate,
    pub factory: TranslatorFactory,
}

impl fmt::Debug for CustomTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTranslator").finish_non_exhaustive()
    }
}

/// Options controlling how trees are rendered
#[derive(Clone)]
pub struct TranslationSettings {
    pub(crate) indent: String,
    pub(crate) line_wrap_threshold: usize,
    pub(crate) show_captured_values: bool,
    pub(crate) use_implicit_type_names: bool,
    pub(crate) use_full_type_names: bool,
    pub(crate) show_implicit_array_element_types: bool,
    pub(crate) show_lambda_parameter_types: bool,
    pub(crate) discard_unused_parameters: bool,
    pub(crate) anonymous_type_namer: Option<AnonymousTypeNamer>,
    pub(crate) custom_translators: Vec<CustomTranslator>,
    pub(crate) formatter: Option<Arc<dyn TokenFormatter>>,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_owned(),
            line_wrap_threshold: DEFAULT_LINE_WRAP_THRESHOLD,
            show_captured_values: false,
            use_implicit_type_names: true,
            use_full_type_names: false,
            show_implicit_array_element_types: false,
            show_lambda_parameter_types: false,
            discard_unused_parameters: false,
            anonymous_type_namer: None,
            custom_translators: Vec::new(),
            formatter: None,
        }
    }
}

impl fmt::Debug for TranslationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationSettings")
            .field("indent", &self.indent)
            .field("line_wrap_threshold", &self.line_wrap_threshold)
            .field("show_captured_values", &self.show_captured_values)
            .field("use_implicit_type_names", &self.use_implicit_type_names)
            .field("use_full_type_names", &self.use_full_type_names)
            .field(
                "show_implicit_array_element_types",
                &self.show_implicit_array_element_types,
            )
            .field("show_lambda_parameter_types", &self.show_lambda_parameter_types)
            .field("discard_unused_parameters", &self.discard_unused_parameters)
            .field("custom_translators", &self.custom_translators.len())
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

impl TranslationSettings {
    /// Indent nested lines with `unit` instead of four spaces
    #[must_use]
    pub fn indent_using(mut self, unit: impl Into<String>) -> Self {
        self.indent = unit.into();
        self
    }

    /// Wrap argument lists, ternaries and call chains beyond `threshold` characters
    #[must_use]
    pub fn wrap_lines_at(mut self, threshold: usize) -> Self {
        self.line_wrap_threshold = threshold.max(1);
        self
    }

    /// Render captured closure variables as their values rather than their names
    #[must_use]
    pub fn show_captured_values(mut self) -> Self {
        self.show_captured_values = true;
        self
    }

    /// Declare variables with their type names instead of `var`
    #[must_use]
    pub fn use_explicit_type_names(mut self) -> Self {
        self.use_implicit_type_names = false;
        self
    }

    /// Qualify type names with their namespaces
    #[must_use]
    pub fn use_full_type_names(mut self) -> Self {
        self.use_full_type_names = true;
        self
    }

    /// Write `new int[] { ... }` instead of `new[] { ... }`
    #[must_use]
    pub fn show_implicit_array_types(mut self) -> Self {
        self.show_implicit_array_element_types = true;
        self
    }

    /// Write lambda parameter types, `(int x) => ...`
    #[must_use]
    pub fn show_lambda_parameter_types(mut self) -> Self {
        self.show_lambda_parameter_types = true;
        self
    }

    /// Render lambda parameters the body never reads as `_`
    #[must_use]
    pub fn discard_unused_parameters(mut self) -> Self {
        self.discard_unused_parameters = true;
        self
    }

    /// Name anonymous types with `namer`
    #[must_use]
    pub fn name_anonymous_types_using(
        mut self,
        namer: impl Fn(&TypeRef) -> String + Send + Sync + 'static,
    ) -> Self {
        self.anonymous_type_namer = Some(Arc::new(namer));
        self
    }

    /// Register a custom translator, consulted in registration order
    #[must_use]
    pub fn with_custom_translator(
        mut self,
        predicate: impl Fn(&Expr) -> bool + Send + Sync + 'static,
        factory: impl Fn(&Expr, &TranslationContext<'_>) -> Box<dyn Translation>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.custom_translators.push(CustomTranslator {
            predicate: Arc::new(predicate),
            factory: Arc::new(factory),
        });
        self
    }

    /// Produce styled output through `formatter`
    #[must_use]
    pub fn format_with(mut self, formatter: impl TokenFormatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Use an already shared formatter
    #[must_use]
    pub fn format_with_shared(mut self, formatter: Arc<dyn TokenFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Indentation unit
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Line wrap threshold in characters
    pub fn line_wrap_threshold(&self) -> usize {
        self.line_wrap_threshold
    }

    /// Are captured values shown instead of names?
    pub fn shows_captured_values(&self) -> bool {
        self.show_captured_values
    }

    /// Is `var` used for declarations?
    pub fn uses_implicit_type_names(&self) -> bool {
        self.use_implicit_type_names
    }

    /// Are type names namespace-qualified?
    pub fn uses_full_type_names(&self) -> bool {
        self.use_full_type_names
    }

    /// Configured formatter, if any
    pub fn formatter(&self) -> Option<&dyn TokenFormatter> {
        self.formatter.as_deref()
    }
}
