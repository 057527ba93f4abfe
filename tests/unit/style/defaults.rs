use super::*;
use crate::style::value::Symbol;

#[test]
fn parses_mixed_string_and_number_seeds() {
    let doc = StyleDefaults::from_json_str(
        r##"{
            "color": {"start": "#000000", "end": "#ffffff"},
            "width": {"start": 3, "end": "0.5"},
            "symbolColor": {"start": "#ff0000", "end": "#00ff00"}
        }"##,
    )
    .unwrap();

    let width = doc.bounds(StyleAttribute::Width).unwrap().unwrap();
    assert_eq!(width.start, StyleValue::Number(3.0));
    assert_eq!(width.end, StyleValue::Number(0.5));
    assert!(doc.bounds(StyleAttribute::SymbolColor).is_some());
    assert!(doc.bounds(StyleAttribute::Length).is_none());
}

#[test]
fn typed_parse_failure_surfaces_per_attribute() {
    let doc = StyleDefaults::from_json_str(r#"{"opacity": {"start": "opaque", "end": 1}}"#)
        .unwrap();
    assert!(doc.bounds(StyleAttribute::Opacity).unwrap().is_err());
}

#[test]
fn builtin_document_agrees_with_builtin_bounds() {
    let doc = StyleDefaults::builtin();
    for attr in StyleAttribute::ALL {
        let parsed = doc.bounds(attr).unwrap().unwrap();
        assert_eq!(parsed, BoundPair::builtin(attr), "{attr}");
    }
}

#[test]
fn builtin_symbol_bounds() {
    let b = BoundPair::builtin(StyleAttribute::Symbol);
    assert_eq!(b.start, StyleValue::Symbol(Symbol::None));
    assert_eq!(b.end, StyleValue::Symbol(Symbol::Dot));
}

#[test]
fn load_reports_missing_file_as_resource_error() {
    let err = StyleDefaults::load(Path::new("target/definitely/missing.json")).unwrap_err();
    assert!(matches!(err, FractreeError::Resource(_)));
}
