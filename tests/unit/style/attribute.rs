use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for attr in StyleAttribute::ALL {
        assert_eq!(attr.name().parse::<StyleAttribute>().unwrap(), attr);
    }
}

#[test]
fn unknown_name_is_rejected() {
    let err = "hue".parse::<StyleAttribute>().unwrap_err();
    assert!(matches!(err, FractreeError::UnknownAttribute(ref n) if n == "hue"));
    assert!("Color".parse::<StyleAttribute>().is_err());
}

#[test]
fn indices_follow_table_order() {
    for (i, attr) in StyleAttribute::ALL.into_iter().enumerate() {
        assert_eq!(attr.index(), i);
    }
}

#[test]
fn store_keys_use_storage_names() {
    assert_eq!(StyleAttribute::Color.start_key(), "branchColorStart");
    assert_eq!(StyleAttribute::Opacity.end_key(), "branchOpacityEnd");
    assert_eq!(StyleAttribute::SymbolColor.start_key(), "symbolColorStart");
}

#[test]
fn laws_per_attribute() {
    assert_eq!(StyleAttribute::Color.law(), InterpLaw::Geometric);
    assert_eq!(StyleAttribute::SymbolColor.law(), InterpLaw::Threshold);
    assert_eq!(StyleAttribute::SymbolColor.kind(), ValueKind::Color);
    assert!(matches!(StyleAttribute::Length.law(), InterpLaw::Linear(_)));
}
