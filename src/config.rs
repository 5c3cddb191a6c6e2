//! `.readex.toml` configuration file support.
//!
//! Provides deserialization, discovery (walk up to `.git` root), and
//! conversion into [`TranslationSettings`]. Only plain options live in the
//! file; custom translators and anonymous type namers are code-only.
//!
//! # Example config
//!
//! ```toml
//! [layout]
//! indent = "\t"
//! line_wrap_threshold = 80
//!
//! [types]
//! implicit_type_names = false
//! full_type_names = true
//!
//! [values]
//! show_captured_values = true
//!
//! [output]
//! format = "ansi"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ReadexError, Result};
use crate::settings::{TranslationSettings, DEFAULT_INDENT, DEFAULT_LINE_WRAP_THRESHOLD};
use crate::writer::{AnsiFormatter, HtmlFormatter, TokenFormatter};

/// Top-level `.readex.toml` configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Indentation and wrapping.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// How type names are written.
    #[serde(default)]
    pub types: TypesConfig,

    /// How values and parameters are written.
    #[serde(default)]
    pub values: ValuesConfig,

    /// Output styling.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Indentation and line wrapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Indentation unit (default: four spaces).
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Line length above which argument lists, initializers and ternaries
    /// wrap (default: 100).
    #[serde(default = "default_line_wrap_threshold")]
    pub line_wrap_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            line_wrap_threshold: default_line_wrap_threshold(),
        }
    }
}

/// Type name rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypesConfig {
    /// Declare variables with `var` (default: true).
    #[serde(default = "default_true")]
    pub implicit_type_names: bool,

    /// Namespace-qualify type names.
    #[serde(default)]
    pub full_type_names: bool,

    /// Write `new int[] { ... }` instead of `new[] { ... }`.
    #[serde(default)]
    pub implicit_array_element_types: bool,

    /// Write lambda parameter types.
    #[serde(default)]
    pub lambda_parameter_types: bool,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            implicit_type_names: true,
            full_type_names: false,
            implicit_array_element_types: false,
            lambda_parameter_types: false,
        }
    }
}

/// Value and parameter rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuesConfig {
    /// Write captured closure values instead of the captured variable names.
    #[serde(default)]
    pub show_captured_values: bool,

    /// Write unused lambda parameters as `_`.
    #[serde(default)]
    pub discard_unused_parameters: bool,
}

/// Output styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain", "ansi" or "html".
    #[serde(default)]
    pub format: OutputFormat,
}

/// Styled output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Unstyled text
    #[default]
    Plain,
    /// Terminal colours
    Ansi,
    /// `<span>`-wrapped, HTML-escaped text
    Html,
}

impl OutputFormat {
    /// Token formatter producing this format, if any
    pub fn formatter(self) -> Option<Arc<dyn TokenFormatter>> {
        match self {
            Self::Plain => None,
            Self::Ansi => Some(Arc::new(AnsiFormatter)),
            Self::Html => Some(Arc::new(HtmlFormatter)),
        }
    }
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_owned()
}

fn default_line_wrap_threshold() -> usize {
    DEFAULT_LINE_WRAP_THRESHOLD
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl RenderConfig {
    /// Parse a `.readex.toml` file from a string.
    pub fn parse(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.readex.toml` file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|error| ReadexError::ConfigIo {
            error,
            path: path.to_path_buf(),
        })?;
        Self::parse(&content)
    }

    /// Validate constraints the TOML schema cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.layout.line_wrap_threshold == 0 {
            return Err(ReadexError::InvalidConfig {
                key: "layout.line_wrap_threshold",
                message: "must be at least 1".into(),
            });
        }
        if self.layout.indent.is_empty()
            || !self.layout.indent.chars().all(|c| c == ' ' || c == '\t')
        {
            return Err(ReadexError::InvalidConfig {
                key: "layout.indent",
                message: format!(
                    "must be one or more spaces or tabs, got {:?}",
                    self.layout.indent
                ),
            });
        }
        Ok(())
    }

    /// Build runtime settings from the file options.
    pub fn into_settings(self) -> TranslationSettings {
        let mut settings = TranslationSettings::default()
            .indent_using(self.layout.indent)
            .wrap_lines_at(self.layout.line_wrap_threshold);
        if !self.types.implicit_type_names {
            settings = settings.use_explicit_type_names();
        }
        if self.types.full_type_names {
            settings = settings.use_full_type_names();
        }
        if self.types.implicit_array_element_types {
            settings = settings.show_implicit_array_types();
        }
        if self.types.lambda_parameter_types {
            settings = settings.show_lambda_parameter_types();
        }
        if self.values.show_captured_values {
            settings = settings.show_captured_values();
        }
        if self.values.discard_unused_parameters {
            settings = settings.discard_unused_parameters();
        }
        match self.output.format.formatter() {
            Some(formatter) => settings.format_with_shared(formatter),
            None => settings,
        }
    }

    /// Generate a default `.readex.toml` config as a string.
    pub fn default_toml() -> &'static str {
        r#"# readex configuration file

# Indentation and wrapping.
[layout]
indent = "    "
line_wrap_threshold = 100

# Type names.
[types]
implicit_type_names = true
full_type_names = false
implicit_array_element_types = false
lambda_parameter_types = false

# Values and parameters.
[values]
show_captured_values = false
discard_unused_parameters = false

# Output styling: "plain", "ansi" or "html".
[output]
format = "plain"
"#
    }
}

// ---------------------------------------------------------------------------
// Config file discovery
// ---------------------------------------------------------------------------

/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = ".readex.toml";

/// Discover a `.readex.toml` by walking up from `start_dir` to the
/// repository root (directory containing `.git`).
///
/// Returns `None` if no config file is found before reaching the filesystem
/// root or the `.git` boundary.
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = if start_dir.is_file() {
        start_dir.parent()?.to_path_buf()
    } else {
        start_dir.to_path_buf()
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Discover and load the config file, returning the parsed config and
/// its path. Returns `Ok(None)` if no config file is found.
pub fn discover_and_load_config(start_dir: &Path) -> Result<Option<(RenderConfig, PathBuf)>> {
    match discover_config(start_dir) {
        Some(path) => {
            let config = RenderConfig::load(&path)?;
            Ok(Some((config, path)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = RenderConfig::parse("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.layout.indent, "    ");
        assert_eq!(config.layout.line_wrap_threshold, 100);
        assert!(config.types.implicit_type_names);
        assert_eq!(config.output.format, OutputFormat::Plain);
    }

    #[test]
    fn test_default_toml_round_trips() {
        let config = RenderConfig::parse(RenderConfig::default_toml()).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let config = RenderConfig::parse(
            r#"
[layout]
indent = "\t"
line_wrap_threshold = 80

[types]
implicit_type_names = false
full_type_names = true

[values]
show_captured_values = true

[output]
format = "html"
"#,
        )
        .unwrap();
        assert_eq!(config.layout.indent, "\t");
        assert_eq!(config.layout.line_wrap_threshold, 80);
        assert!(!config.types.implicit_type_names);
        assert!(config.types.full_type_names);
        assert!(config.values.show_captured_values);
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = RenderConfig::parse("[layout]\nwidth = 3\n").unwrap_err();
        assert!(matches!(err, ReadexError::ConfigParse(_)));
        let err = RenderConfig::parse("[colours]\n").unwrap_err();
        assert!(matches!(err, ReadexError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RenderConfig::parse("[layout]\nline_wrap_threshold = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ReadexError::InvalidConfig {
                key: "layout.line_wrap_threshold",
                ..
            }
        ));
        let err = RenderConfig::parse("[layout]\nindent = \"--\"\n").unwrap_err();
        assert!(matches!(err, ReadexError::InvalidConfig { key: "layout.indent", .. }));
        assert!(RenderConfig::parse("[output]\nformat = \"pdf\"\n").is_err());
    }

    #[test]
    fn test_into_settings() {
        let config = RenderConfig::parse(
            "[layout]\nindent = \"  \"\nline_wrap_threshold = 60\n\n[types]\nimplicit_type_names = false\n\n[output]\nformat = \"ansi\"\n",
        )
        .unwrap();
        let settings = config.into_settings();
        assert_eq!(settings.indent(), "  ");
        assert_eq!(settings.line_wrap_threshold(), 60);
        assert!(!settings.uses_implicit_type_names());
        assert!(settings.formatter().is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = RenderConfig::load(&tmp.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ReadexError::ConfigIo { .. }));
    }

    #[test]
    fn test_discover_in_parent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[layout]\nline_wrap_threshold = 72\n",
        )
        .unwrap();
        let nested = tmp.path().join("src").join("trees");
        std::fs::create_dir_all(&nested).unwrap();

        let found = discover_config(&nested).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE_NAME));

        let (config, path) = discover_and_load_config(&nested).unwrap().unwrap();
        assert_eq!(path, found);
        assert_eq!(config.layout.line_wrap_threshold, 72);
    }

    #[test]
    fn test_discovery_stops_at_git_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let repo = tmp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();

        assert_eq!(discover_config(&repo), None);
        assert!(discover_and_load_config(&repo).unwrap().is_none());
    }

    #[test]
    fn test_discover_from_file_path() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let tree = tmp.path().join("tree.json");
        std::fs::write(&tree, "{}").unwrap();
        assert_eq!(
            discover_config(&tree),
            Some(tmp.path().join(CONFIG_FILE_NAME))
        );
    }
}
