//! Config discovery feeding the renderer.
//!
//! Writes `.readex.toml` files into temporary project trees, discovers them
//! from nested directories and renders with the resulting settings.

use std::fs;

use readex::{discover_and_load_config, translate_formatted, translate_with, CONFIG_FILE_NAME};
use readex_repr::{BinaryOp, Expr, ExprBuilder, TypeRef};
use tempfile::TempDir;

use super::common::write_line;

fn guarded_write() -> Expr {
    let mut b = ExprBuilder::new();
    let total = b.variable("total", TypeRef::INT);
    Expr::void_block(
        vec![total.clone()],
        vec![
            Expr::assign(Expr::var(&total), Expr::int(3)),
            Expr::if_then(
                Expr::binary(BinaryOp::GreaterThan, Expr::var(&total), Expr::int(0)),
                write_line(vec![Expr::var(&total)]),
            ),
        ],
    )
}

#[test]
fn test_discovered_config_drives_rendering() {
    let project = TempDir::new().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    fs::write(
        project.path().join(CONFIG_FILE_NAME),
        "[layout]\nindent = \"\\t\"\n\n[types]\nimplicit_type_names = false\n",
    )
    .unwrap();
    let nested = project.path().join("trees").join("samples");
    fs::create_dir_all(&nested).unwrap();

    let (config, path) = discover_and_load_config(&nested).unwrap().unwrap();
    assert_eq!(path, project.path().join(CONFIG_FILE_NAME));

    let rendered = translate_with(&guarded_write(), &config.into_settings()).unwrap();
    assert!(rendered.starts_with("int total = 3;"), "{rendered}");
    assert!(rendered.contains("\n\tConsole.WriteLine(total);\n"), "{rendered}");
    assert!(!rendered.contains("    "), "{rendered}");
}

#[test]
fn test_discovery_stops_at_repository_root() {
    let outer = TempDir::new().unwrap();
    fs::write(outer.path().join(CONFIG_FILE_NAME), "[layout]\nindent = \"\\t\"\n").unwrap();
    let project = outer.path().join("project");
    fs::create_dir_all(project.join(".git")).unwrap();

    assert!(discover_and_load_config(&project).unwrap().is_none());
}

#[test]
fn test_html_format_from_config() {
    let project = TempDir::new().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    fs::write(project.path().join(CONFIG_FILE_NAME), "[output]\nformat = \"html\"\n").unwrap();

    let (config, _) = discover_and_load_config(project.path()).unwrap().unwrap();
    let output = translate_formatted(&guarded_write(), &config.into_settings()).unwrap();
    let styled = output.styled.unwrap();
    assert!(styled.contains(" &gt; "), "{styled}");
    assert!(styled.contains("<span class=\""), "{styled}");
    assert_eq!(
        output.tokens.iter().map(|(text, _)| text.as_str()).collect::<String>(),
        output.plain
    );
}

#[test]
fn test_invalid_config_reports_key() {
    let project = TempDir::new().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    fs::write(
        project.path().join(CONFIG_FILE_NAME),
        "[layout]\nline_wrap_threshold = 0\n",
    )
    .unwrap();

    let err = discover_and_load_config(project.path()).unwrap_err();
    assert!(err.to_string().contains("layout.line_wrap_threshold"), "{err}");
}
