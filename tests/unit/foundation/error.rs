use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FractreeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FractreeError::contract("x")
            .to_string()
            .contains("contract violation:")
    );
    assert!(
        FractreeError::unknown_attribute("x")
            .to_string()
            .contains("unknown attribute:")
    );
    assert!(
        FractreeError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        FractreeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        FractreeError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        FractreeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FractreeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn contract_classification() {
    assert!(FractreeError::contract("layer 9").is_contract_violation());
    assert!(FractreeError::unknown_attribute("hue").is_contract_violation());
    assert!(!FractreeError::resource("missing").is_contract_violation());
}
