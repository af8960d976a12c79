//! Infrastructure constants

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Stage used when none is given
pub const DEFAULT_STAGE: &str = "default";

/// Environment variable read by [`Stage::from_env`](crate::config::Stage::from_env)
pub const STAGE_ENV_VAR: &str = "ARBITER_STAGE";

/// Configuration file name prefix, followed by the stage
pub const CONFIG_FILE_PREFIX: &str = "config-";

/// Configuration file extension
pub const CONFIG_FILE_EXTENSION: &str = "toml";

/// Table holding logging settings inside a configuration file
pub const LOGGING_SECTION: &str = "logging";

// ============================================================================
// LOGGING
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive that overrides the
/// configured level
pub const LOG_ENV_VAR: &str = "ARBITER_LOG";
