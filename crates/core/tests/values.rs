//! Tests for style value normalization and flow classification.

use folio_core::css::{
    extract_translate, is_removed_from_flow, normalize_number, resolve_layout, Declarations,
    LayoutKind, Normalizer, Translate,
};
use folio_core::CompileConfig;

fn normalizer() -> Normalizer {
    Normalizer::new(CompileConfig::default().colors)
}

fn decls(pairs: &[(&str, &str)]) -> Declarations {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_normalize_number_units() {
    assert_eq!(normalize_number("50%", Some(800.0)), Some(400.0));
    assert_eq!(normalize_number("50%", None), None);
    assert_eq!(normalize_number("12px", None), Some(12.0));
    assert_eq!(normalize_number(" 12.5px ", None), Some(12.5));
    assert_eq!(normalize_number("320", None), Some(320.0));
    assert_eq!(normalize_number("-4.5", None), Some(-4.5));
    assert_eq!(normalize_number("auto", None), None);
    assert_eq!(normalize_number("3em", None), None);
    assert_eq!(normalize_number("px", None), None);
    assert_eq!(normalize_number("", Some(100.0)), None);
    assert_eq!(normalize_number("1.", None), None);
}

#[test]
fn test_normalize_color_equivalents() {
    let n = normalizer();
    for raw in ["red", " RED ", "#f00", "#F00", "rgb(255,0,0)", "rgb(255, 0, 0)", "#ff0000"] {
        assert_eq!(n.normalize_color(raw).as_deref(), Some("#ff0000"), "input {:?}", raw);
    }
}

#[test]
fn test_normalize_color_table_and_edges() {
    let n = normalizer();
    assert_eq!(n.normalize_color("grey").as_deref(), Some("#808080"));
    assert_eq!(n.normalize_color("green").as_deref(), Some("#008000"));
    assert_eq!(n.normalize_color("transparent").as_deref(), Some("#00000000"));
    assert_eq!(n.normalize_color("rgba(16, 32, 48, 0.5)").as_deref(), Some("#102030"));
    assert_eq!(n.normalize_color("rgb(300, 0, 0)").as_deref(), Some("#ff0000"));

    assert_eq!(n.normalize_color("rgb(1, 2)"), None);
    assert_eq!(n.normalize_color("orange"), None);
    assert_eq!(n.normalize_color("#abcd"), None);
    assert_eq!(n.normalize_color("#ggg"), None);
    assert_eq!(n.normalize_color("#11223344"), None);
    assert_eq!(n.normalize_color(""), None);
}

#[test]
fn test_custom_color_table() {
    let config = CompileConfig::from_toml_str("[colors]\nOrange = \"#ffa500\"\n").unwrap();
    let n = Normalizer::new(config.colors);
    assert_eq!(n.normalize_color("orange").as_deref(), Some("#ffa500"));
    assert_eq!(n.normalize_color("red").as_deref(), Some("#ff0000"));
}

#[test]
fn test_extract_translate() {
    assert_eq!(
        extract_translate("translateX(10px) translateY(-5px)"),
        Translate { x: 10.0, y: -5.0 }
    );
    assert_eq!(
        extract_translate("translateY(7.5px) rotate(4deg) translateX(-2px)"),
        Translate { x: -2.0, y: 7.5 }
    );
    assert_eq!(extract_translate("translateX(3px)"), Translate { x: 3.0, y: 0.0 });
    assert_eq!(extract_translate("translateX(3em)"), Translate { x: 0.0, y: 0.0 });
    assert_eq!(extract_translate(""), Translate { x: 0.0, y: 0.0 });
}

#[test]
fn test_removed_from_flow() {
    assert!(!is_removed_from_flow(&decls(&[])));
    assert!(!is_removed_from_flow(&decls(&[("position", "static"), ("color", "red")])));
    assert!(!is_removed_from_flow(&decls(&[("position", "fixed")])));
    assert!(is_removed_from_flow(&decls(&[("position", "absolute")])));
    assert!(is_removed_from_flow(&decls(&[("position", "relative")])));
    assert!(is_removed_from_flow(&decls(&[("transform", "rotate(4deg)")])));
    assert!(is_removed_from_flow(&decls(&[("top", "0")])));
    assert!(is_removed_from_flow(&decls(&[("right", "4px")])));
}

#[test]
fn test_resolve_layout() {
    assert_eq!(resolve_layout(&decls(&[])), LayoutKind::Column);
    assert_eq!(resolve_layout(&decls(&[("display", "block")])), LayoutKind::Column);
    assert_eq!(resolve_layout(&decls(&[("display", "flex")])), LayoutKind::Row);
    assert_eq!(
        resolve_layout(&decls(&[("display", "flex"), ("flex-direction", "row-reverse")])),
        LayoutKind::Row
    );
    assert_eq!(
        resolve_layout(&decls(&[("display", "flex"), ("flex-direction", "column")])),
        LayoutKind::Column
    );
    assert_eq!(
        resolve_layout(&decls(&[("flex-direction", "row")])),
        LayoutKind::Column
    );
}
