//! Logging Tests

use arbiter_domain::Error;
use arbiter_infrastructure::constants::DEFAULT_LOG_LEVEL;
use arbiter_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        json_format: false,
    };
    assert!(matches!(init_logging(&config), Err(Error::Configuration { .. })));
}

#[test]
fn test_init_logging_fails_when_subscriber_installed() {
    let config = LoggingConfig::default();
    // Installs the global subscriber unless an earlier test already did
    let _ = init_logging(&config);

    match init_logging(&config) {
        Err(Error::Configuration { source, .. }) => assert!(source.is_some()),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}
