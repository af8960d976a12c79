//! Configuration loader
//!
//! Loads `config-<stage>.toml` from the configuration directory into a flat
//! [`ConfigStore`]. Nested tables become dotted keys:
//!
//! ```toml
//! test-string = "test this"
//! test-int = 5
//!
//! [smtp]
//! host = "localhost"   # key: smtp.host
//! ```
//!
//! A missing file yields an empty store. A file that exists but cannot be
//! parsed is an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use arbiter_domain::{ConfigStore, Error, Result};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};

use crate::config::{LoggingConfig, Stage};
use crate::constants::{CONFIG_FILE_EXTENSION, CONFIG_FILE_PREFIX, LOGGING_SECTION};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Directory holding the configuration files, current directory if unset
    config_dir: Option<PathBuf>,

    /// Stage selecting the file
    stage: Stage,
}

impl ConfigLoader {
    /// Loader for the default stage in the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stage
    pub fn with_stage<S: Into<Stage>>(mut self, stage: S) -> Self {
        self.stage = stage.into();
        self
    }

    /// Set the directory holding the configuration files
    pub fn with_config_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Selected stage
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Path of the file for the selected stage
    pub fn config_path(&self) -> PathBuf {
        let file_name = format!(
            "{CONFIG_FILE_PREFIX}{}.{CONFIG_FILE_EXTENSION}",
            self.stage
        );
        match &self.config_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Load the configuration store for the selected stage
    pub fn load(&self) -> Result<ConfigStore> {
        let Some(figment) = self.figment() else {
            return Ok(ConfigStore::new());
        };

        let table: toml::Table = figment
            .extract()
            .with_context(|| format!("Failed to parse {}", self.config_path().display()))?;

        let mut values = BTreeMap::new();
        flatten("", &table, &mut values)?;
        Ok(values.into_iter().collect())
    }

    /// Load the `[logging]` table, falling back to defaults
    pub fn logging_config(&self) -> Result<LoggingConfig> {
        let defaults =
            Figment::new().merge(Serialized::default(LOGGING_SECTION, LoggingConfig::default()));
        let figment = match self.figment() {
            Some(file) => defaults.merge(file),
            None => defaults,
        };

        figment
            .extract_inner::<LoggingConfig>(LOGGING_SECTION)
            .context("Failed to read logging configuration")
    }

    /// Figment over the stage file, `None` when the file does not exist
    fn figment(&self) -> Option<Figment> {
        let path = absolute(self.config_path());
        if !path.is_file() {
            log_config_loaded(&path, false);
            return None;
        }
        log_config_loaded(&path, true);
        Some(Figment::from(Toml::file(path)))
    }
}

/// Anchor relative paths at the current directory so figment does not search
/// parent directories
fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) -> Result<()> {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let rendered = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(d) => d.to_string(),
            toml::Value::Table(nested) => {
                flatten(&key, nested, out)?;
                continue;
            }
            toml::Value::Array(_) => {
                return Err(Error::configuration(format!(
                    "Arrays are not supported in configuration: {key}"
                )));
            }
        };
        out.insert(key, rendered);
    }
    Ok(())
}
