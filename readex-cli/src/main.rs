//! readex: render serialized code trees as readable source.
//!
//! # Usage
//!
//! ```bash
//! # Render a tree document with discovered config
//! readex render tree.json
//!
//! # Render from stdin as HTML
//! readex render --format html < tree.json
//!
//! # Generate default config
//! readex init > .readex.toml
//!
//! # Run with debug logging
//! readex -vv render tree.json
//! ```

mod cli;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use readex::{discover_and_load_config, translate_formatted, RenderConfig};
use readex_repr::{read_tree, TreeDocument};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, RenderArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Commands::Render(args) => run_render(&cli, args),
        Commands::Init => {
            print!("{}", RenderConfig::default_toml());
            Ok(())
        }
    }
}

fn run_render(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let mut config = load_config(cli, args.tree_path().map(|path| path.as_path()))?;
    args.apply(&mut config);
    config.validate().context("Invalid render options")?;

    let doc = read_document(args.tree_path().map(|path| path.as_path()))?;
    debug!(
        name = doc.name.as_deref().unwrap_or("<unnamed>"),
        nodes = doc.root.node_count(),
        "decoded tree"
    );

    let settings = config.into_settings();
    let Some(output) = translate_formatted(&doc.root, &settings) else {
        info!("tree renders to nothing");
        return Ok(());
    };

    let text = output.styled.unwrap_or(output.plain);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("Failed to write output")?;
    Ok(())
}

fn load_config(cli: &Cli, tree: Option<&Path>) -> Result<RenderConfig> {
    if cli.no_config {
        return Ok(RenderConfig::default());
    }
    if let Some(path) = &cli.config {
        return RenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let start = match tree.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir().context("Failed to read current directory")?,
    };
    match discover_and_load_config(&start)? {
        Some((config, path)) => {
            info!(path = %path.display(), "using config");
            Ok(config)
        }
        None => Ok(RenderConfig::default()),
    }
}

fn read_document(path: Option<&Path>) -> Result<TreeDocument> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open tree {}", path.display()))?;
            read_tree(BufReader::new(file))
                .with_context(|| format!("Failed to decode tree {}", path.display()))
        }
        None => read_tree(io::stdin().lock()).context("Failed to decode tree from stdin"),
    }
}
