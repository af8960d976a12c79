//! Error context extension tests

use arbiter_domain::Error;
use arbiter_infrastructure::ErrorContext;

fn failing_io() -> std::io::Result<()> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn test_context_wraps_as_configuration_error() {
    let err = failing_io().context("Reading stage file").unwrap_err();
    match err {
        Error::Configuration { message, source } => {
            assert_eq!(message, "Reading stage file: gone");
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let mut called = false;
    let ok: std::io::Result<u8> = Ok(1);
    let value = ok
        .with_context(|| {
            called = true;
            "never"
        })
        .unwrap();
    assert_eq!(value, 1);
    assert!(!called);
}
