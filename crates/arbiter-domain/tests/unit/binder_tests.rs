//! Unit tests for configuration value coercion

use arbiter_domain::{ConfigBinder, ConfigValue, Error, TypeKey};

#[test]
fn test_string_passthrough() {
    let value = ConfigBinder::bind(Some("test this"), TypeKey::of::<String>()).unwrap();
    assert_eq!(value, ConfigValue::Text("test this".to_string()));
}

#[test]
fn test_absent_string_binds_empty() {
    let value = ConfigBinder::bind(None, TypeKey::of::<String>()).unwrap();
    assert_eq!(value, ConfigValue::Text(String::new()));
}

#[test]
fn test_optional_string_keeps_absence() {
    assert_eq!(
        ConfigBinder::bind(None, TypeKey::of::<Option<String>>()).unwrap(),
        ConfigValue::OptionalText(None)
    );
    assert_eq!(
        ConfigBinder::bind(Some("x"), TypeKey::of::<Option<String>>()).unwrap(),
        ConfigValue::OptionalText(Some("x".to_string()))
    );
}

#[test]
fn test_numeric_parse() {
    assert_eq!(
        ConfigBinder::bind(Some("5"), TypeKey::of::<i32>()).unwrap(),
        ConfigValue::Int(5)
    );
    assert_eq!(
        ConfigBinder::bind(Some("-6"), TypeKey::of::<i16>()).unwrap(),
        ConfigValue::Short(-6)
    );
}

#[test]
fn test_unparsable_numeric_carries_raw_value() {
    let err = ConfigBinder::bind(Some("five"), TypeKey::of::<i32>()).unwrap_err();
    match err {
        Error::CoercionError { raw, target } => {
            assert_eq!(raw, "five");
            assert_eq!(target, "i32");
        }
        other => panic!("Expected CoercionError, got {other:?}"),
    }
}

#[test]
fn test_absent_numeric_fails_coercion() {
    let err = ConfigBinder::bind(None, TypeKey::of::<i16>()).unwrap_err();
    assert!(matches!(err, Error::CoercionError { .. }));
}

#[test]
fn test_unsupported_target() {
    let err = ConfigBinder::bind(Some("1.5"), TypeKey::of::<f64>()).unwrap_err();
    match err {
        Error::UnsupportedCoercionTarget { target } => assert_eq!(target, "f64"),
        other => panic!("Expected UnsupportedCoercionTarget, got {other:?}"),
    }
}
