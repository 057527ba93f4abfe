use super::*;
use serde_json::json;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(Rgb8::parse_hex("#42D9C8").unwrap(), Rgb8::new(0x42, 0xd9, 0xc8));
    assert_eq!(Rgb8::parse_hex("ad343e").unwrap(), Rgb8::new(0xad, 0x34, 0x3e));
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
    assert!(Rgb8::parse_hex("").is_err());
    assert!(Rgb8::parse_hex("#ééé").is_err());
}

#[test]
fn display_is_lowercase_padded() {
    assert_eq!(Rgb8::new(0, 10, 255).to_string(), "#000aff");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgb8 = serde_json::from_value(json!("#ff0080")).unwrap();
    assert_eq!(c, Rgb8::new(255, 0, 128));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#ff0080"));
    assert!(serde_json::from_value::<Rgb8>(json!(12)).is_err());
}

#[test]
fn canvas_center() {
    let c = Canvas {
        width: 640,
        height: 480,
    };
    assert_eq!(c.center(), Point::new(320.0, 240.0));
}
