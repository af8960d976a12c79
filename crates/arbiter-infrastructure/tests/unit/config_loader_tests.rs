//! Configuration loader tests

use std::fs;

use arbiter_domain::Error;
use arbiter_infrastructure::config::{ConfigLoader, LoggingConfig, Stage};
use arbiter_infrastructure::constants::{DEFAULT_LOG_LEVEL, STAGE_ENV_VAR};

/// Helper to set env var safely
fn set_env(key: &str, value: &str) {
    // SAFETY: no other test in this binary reads or writes this variable
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Helper to remove env var safely
fn remove_env(key: &str) {
    // SAFETY: no other test in this binary reads or writes this variable
    unsafe {
        std::env::remove_var(key);
    }
}

fn write_stage(dir: &tempfile::TempDir, stage: &str, contents: &str) {
    fs::write(dir.path().join(format!("config-{stage}.toml")), contents)
        .expect("Failed to write config file");
}

#[test]
fn test_default_stage_file_name() {
    let loader = ConfigLoader::new();
    assert_eq!(loader.stage(), &Stage::default());
    assert_eq!(loader.stage().as_str(), "default");
    assert!(loader.config_path().ends_with("config-default.toml"));
}

#[test]
fn test_stage_selects_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_stage(&dir, "default", "greeting = \"hello\"");
    write_stage(&dir, "prod", "greeting = \"good day\"");

    let store = ConfigLoader::new()
        .with_config_dir(dir.path())
        .with_stage("prod")
        .load()
        .unwrap();

    assert_eq!(store.get("greeting"), Some("good day"));
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = ConfigLoader::new()
        .with_config_dir(dir.path())
        .with_stage("nowhere")
        .load()
        .unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_values_rendered_as_strings() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_stage(
        &dir,
        "default",
        r#"
        test-string = "test this"
        test-int = 5
        test-short = "6"

        [smtp]
        host = "localhost"
        "#,
    );

    let store = ConfigLoader::new().with_config_dir(dir.path()).load().unwrap();

    assert_eq!(store.get("test-string"), Some("test this"));
    assert_eq!(store.get("test-int"), Some("5"));
    assert_eq!(store.get("test-short"), Some("6"));
    assert_eq!(store.get("smtp.host"), Some("localhost"));
    assert_eq!(store.get("smtp"), None);
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_stage(&dir, "default", "this is = = not toml");

    let err = ConfigLoader::new()
        .with_config_dir(dir.path())
        .load()
        .unwrap_err();

    match err {
        Error::Configuration { message, source } => {
            assert!(message.contains("config-default.toml"));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_logging_section_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = ConfigLoader::new()
        .with_config_dir(dir.path())
        .logging_config()
        .unwrap();
    assert_eq!(config, LoggingConfig::default());
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_logging_section_overrides() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_stage(&dir, "default", "[logging]\nlevel = \"debug\"");

    let config = ConfigLoader::new()
        .with_config_dir(dir.path())
        .logging_config()
        .unwrap();

    assert_eq!(config.level, "debug");
    assert!(!config.json_format);
}

#[test]
fn test_stage_conversions() {
    assert_eq!(Stage::from("qa"), Stage::new("qa"));
    assert_eq!(Stage::from(String::from("qa")).to_string(), "qa");
}

#[test]
fn test_stage_from_env() {
    set_env(STAGE_ENV_VAR, " qa ");
    assert_eq!(Stage::from_env(), Stage::new("qa"));

    set_env(STAGE_ENV_VAR, "   ");
    assert_eq!(Stage::from_env(), Stage::default());

    remove_env(STAGE_ENV_VAR);
    assert_eq!(Stage::from_env(), Stage::default());
}
