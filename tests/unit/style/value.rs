use super::*;

#[test]
fn parse_by_kind() {
    assert_eq!(
        StyleValue::parse(ValueKind::Color, "#102030").unwrap(),
        StyleValue::Color(Rgb8::new(0x10, 0x20, 0x30))
    );
    assert_eq!(
        StyleValue::parse(ValueKind::Number, "0.75").unwrap(),
        StyleValue::Number(0.75)
    );
    assert_eq!(
        StyleValue::parse(ValueKind::Symbol, "circle").unwrap(),
        StyleValue::Symbol(Symbol::Circle)
    );
}

#[test]
fn parse_rejects_nan_and_unknown_symbols() {
    assert!(StyleValue::parse(ValueKind::Number, "NaN").is_err());
    assert!(StyleValue::parse(ValueKind::Number, "wide").is_err());
    assert!(StyleValue::parse(ValueKind::Symbol, "star").is_err());
}

#[test]
fn empty_symbol_means_none() {
    assert_eq!("".parse::<Symbol>().unwrap(), Symbol::None);
    assert!(!Symbol::None.is_visible());
    assert!(Symbol::Dot.is_visible());
}

#[test]
fn display_matches_parse() {
    for (kind, raw) in [
        (ValueKind::Color, "#abcdef"),
        (ValueKind::Number, "2.5"),
        (ValueKind::Symbol, "dot"),
    ] {
        let v = StyleValue::parse(kind, raw).unwrap();
        assert_eq!(v.to_string(), raw);
    }
}

#[test]
fn accessors_flag_kind_mismatch_as_contract_violation() {
    let v = StyleValue::Number(1.0);
    assert!(v.as_color().unwrap_err().is_contract_violation());
    assert!(v.as_symbol().unwrap_err().is_contract_violation());
    assert_eq!(v.as_number().unwrap(), 1.0);
}
