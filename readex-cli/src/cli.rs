//! CLI argument definitions for readex.
//!
//! Kept apart from `main` so the tests can use [`Cli::try_parse_from`] to
//! verify argument handling without spawning a subprocess.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use readex::{OutputFormat, RenderConfig};

/// Parse a positive (>= 1) usize value for CLI arguments.
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let val: usize = s.parse().map_err(|e| format!("invalid integer: {}", e))?;
    if val == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(val)
}

/// readex: render code trees as readable source.
///
/// Quick start:
///   readex render tree.json          Render a tree document
///   readex render - < tree.json      Render from stdin
///   readex init > .readex.toml       Generate a default config
#[derive(Parser, Debug)]
#[command(name = "readex")]
#[command(version)]
#[command(about = "Render code trees as readable C#-style source", long_about = None)]
#[command(after_help = "\
CONFIGURATION:
  readex looks for a .readex.toml config file, searching from the directory\n\
  of the tree document (or the current directory) up to the nearest .git\n\
  root. CLI flags always override config file settings.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a .readex.toml config file, overriding discovery.
    #[arg(long, global = true, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any .readex.toml file.
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a JSON tree document.
    Render(RenderArgs),

    /// Print a default .readex.toml to stdout.
    Init,
}

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Plain,
    Ansi,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Ansi => Self::Ansi,
            FormatArg::Html => Self::Html,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Tree document to render; reads stdin when absent or `-`.
    pub tree: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Indentation unit, e.g. "\t" or "  ".
    #[arg(long)]
    pub indent: Option<String>,

    /// Line length above which lists and ternaries wrap.
    #[arg(long, value_parser = parse_positive_usize)]
    pub wrap: Option<usize>,

    /// Declare variables with their type names instead of `var`.
    #[arg(long)]
    pub explicit_types: bool,

    /// Namespace-qualify type names.
    #[arg(long)]
    pub full_type_names: bool,

    /// Write captured closure values instead of variable names.
    #[arg(long)]
    pub show_captured_values: bool,
}

impl RenderArgs {
    /// Tree path, or `None` for stdin
    pub fn tree_path(&self) -> Option<&PathBuf> {
        self.tree.as_ref().filter(|path| path.as_os_str() != "-")
    }

    /// Apply flag overrides on top of file config
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(indent) = &self.indent {
            config.layout.indent = indent.replace("\\t", "\t");
        }
        if let Some(wrap) = self.wrap {
            config.layout.line_wrap_threshold = wrap;
        }
        if self.explicit_types {
            config.types.implicit_type_names = false;
        }
        if self.full_type_names {
            config.types.full_type_names = true;
        }
        if self.show_captured_values {
            config.values.show_captured_values = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args(args: &[&str]) -> RenderArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Render(args) => args,
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn test_render_defaults() {
        let args = render_args(&["readex", "render", "tree.json"]);
        assert_eq!(args.tree_path(), Some(&PathBuf::from("tree.json")));
        assert_eq!(args.format, None);

        let stdin = render_args(&["readex", "render", "-"]);
        assert_eq!(stdin.tree_path(), None);
    }

    #[test]
    fn test_overrides_applied() {
        let args = render_args(&[
            "readex",
            "render",
            "--format",
            "html",
            "--indent",
            "\\t",
            "--wrap",
            "60",
            "--explicit-types",
        ]);
        let mut config = RenderConfig::default();
        args.apply(&mut config);
        assert_eq!(config.output.format, OutputFormat::Html);
        assert_eq!(config.layout.indent, "\t");
        assert_eq!(config.layout.line_wrap_threshold, 60);
        assert!(!config.types.implicit_type_names);
        assert!(!config.types.full_type_names);
    }

    #[test]
    fn test_zero_wrap_rejected() {
        assert!(Cli::try_parse_from(["readex", "render", "--wrap", "0"]).is_err());
    }

    #[test]
    fn test_config_conflicts_with_no_config() {
        assert!(Cli::try_parse_from([
            "readex",
            "--config",
            "a.toml",
            "--no-config",
            "init"
        ])
        .is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["readex", "-vv", "init"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Init));
    }
}
