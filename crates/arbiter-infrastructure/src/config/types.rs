//! Configuration types

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STAGE, STAGE_ENV_VAR};

/// Deployment stage selecting which configuration file is loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stage(String);

impl Stage {
    /// Stage with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Stage named by `ARBITER_STAGE`, or the default stage when unset or
    /// empty
    pub fn from_env() -> Self {
        match env::var(STAGE_ENV_VAR) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Self::default(),
        }
    }

    /// Stage name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Stage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Stage {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Logging configuration, read from the `[logging]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}
