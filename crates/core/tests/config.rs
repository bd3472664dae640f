//! Tests for configuration and input loading.

use folio_core::model::CompileInput;
use folio_core::{CompileConfig, Error};
use pretty_assertions::assert_eq;

#[test]
fn test_default_config() {
    let config = CompileConfig::default();
    assert_eq!(config.page.width, 794.0);
    assert_eq!(config.page.height, 1123.0);
    assert_eq!(config.page.background, "#ffffff");
    assert_eq!(config.colors.len(), 9);
    assert_eq!(config.colors["transparent"], "#00000000");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = CompileConfig::from_toml_str("placeholder_image = \"cover.png\"\n[page]\nheight = 600.5\n").unwrap();
    assert_eq!(config.placeholder_image, "cover.png");
    assert_eq!(config.page.height, 600.5);
    assert_eq!(config.page.width, 794.0);
    assert_eq!(config.page.id, "page-1");
    assert_eq!(config.colors, CompileConfig::default().colors);

    assert_eq!(CompileConfig::from_toml_str("").unwrap(), CompileConfig::default());
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        CompileConfig::from_toml_str("[page]\nwidth = \"wide\"\n"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        CompileConfig::load("/nonexistent/folio.toml"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(&path, "[page]\nid = \"cover\"\n").unwrap();
    assert_eq!(CompileConfig::load(&path).unwrap().page.id, "cover");
}

#[test]
fn test_compile_input() {
    let input = CompileInput::from_json_str(r##"{"html": "<p>x</p>", "css": "#a{}"}"##).unwrap();
    assert_eq!(input.html, "<p>x</p>");
    assert!(folio_core::compile(&input.html, &input.css).is_ok());

    let missing = CompileInput::from_json_str(r#"{"html": "<p>x</p>"}"#).unwrap();
    assert_eq!(missing.css, "");
    assert!(matches!(
        folio_core::compile(&missing.html, &missing.css),
        Err(Error::InvalidInput(_))
    ));

    assert!(matches!(CompileInput::from_json_str("[1, 2]"), Err(Error::Json(_))));
}
