//! Unit tests for domain error types

use arbiter_domain::{BoxError, Error};

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("boom")]
struct Boom;

#[test]
fn test_not_a_component_error() {
    let error = Error::not_a_component("app::Widget");
    match &error {
        Error::NotAComponent { component } => assert_eq!(component, "app::Widget"),
        _ => panic!("Expected NotAComponent error"),
    }
    assert!(error.to_string().contains("app::Widget"));
}

#[test]
fn test_coercion_error_marks_absent_value() {
    let error = Error::coercion(None, "i32");
    match error {
        Error::CoercionError { raw, target } => {
            assert_eq!(raw, "<absent>");
            assert_eq!(target, "i32");
        }
        _ => panic!("Expected CoercionError"),
    }
}

#[test]
fn test_contract_violations_are_distinguishable() {
    assert!(Error::circular_dependency("A").is_contract_violation());
    assert!(Error::ambiguous_component("A", 2).is_contract_violation());
    assert!(Error::unsupported_coercion_target("f64").is_contract_violation());
    assert!(!Error::Component(Box::new(Boom)).is_contract_violation());
    assert!(!Error::Teardown(Box::new(Boom)).is_contract_violation());
    assert!(!Error::configuration("bad file").is_contract_violation());
}

#[test]
fn test_user_errors_display_unchanged() {
    let error = Error::Component(Box::new(Boom));
    assert_eq!(error.to_string(), "boom");
}

#[test]
fn test_into_user_error_recovers_original() {
    let source: BoxError = Box::new(Boom);
    let recovered = Error::Teardown(source).into_user_error().unwrap();
    assert_eq!(recovered.downcast_ref::<Boom>(), Some(&Boom));

    let contract = Error::missing_implementation("dyn Api").into_user_error();
    assert!(matches!(contract, Err(Error::MissingImplementation { .. })));
}
