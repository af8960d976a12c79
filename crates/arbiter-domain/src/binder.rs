//! Configuration value coercion
//!
//! Converts raw configuration strings into the declared type of a constructor
//! parameter. Supported targets:
//!
//! | Parameter type | Absent key | Present value |
//! |----------------|------------|---------------|
//! | `String` | empty string | passed through |
//! | `Option<String>` | `None` | `Some(value)` |
//! | `i32` | coercion error | parsed |
//! | `i16` | coercion error | parsed |

use crate::error::{Error, Result};
use crate::types::TypeKey;

/// A coerced configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// `String` parameter
    Text(String),
    /// `Option<String>` parameter
    OptionalText(Option<String>),
    /// `i32` parameter
    Int(i32),
    /// `i16` parameter
    Short(i16),
}

/// Types a bound configuration value can be read back as
pub trait FromConfigValue: Sized + 'static {
    /// Extract `Self`, or `None` if the value was bound for another type
    fn from_config_value(value: ConfigValue) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_config_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FromConfigValue for Option<String> {
    fn from_config_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::OptionalText(s) => Some(s),
            _ => None,
        }
    }
}

impl FromConfigValue for i32 {
    fn from_config_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl FromConfigValue for i16 {
    fn from_config_value(value: ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Short(s) => Some(s),
            _ => None,
        }
    }
}

/// Scalar coercion for config-bound constructor parameters
pub struct ConfigBinder;

impl ConfigBinder {
    /// Coerce `raw` into the parameter type `target`
    ///
    /// An absent value is passed through to the coercion rather than rejected
    /// up front, so it only fails for numeric targets.
    pub fn bind(raw: Option<&str>, target: TypeKey) -> Result<ConfigValue> {
        if target == TypeKey::of::<String>() {
            Ok(ConfigValue::Text(raw.unwrap_or_default().to_string()))
        } else if target == TypeKey::of::<Option<String>>() {
            Ok(ConfigValue::OptionalText(raw.map(str::to_string)))
        } else if target == TypeKey::of::<i32>() {
            raw.and_then(|r| r.parse::<i32>().ok())
                .map(ConfigValue::Int)
                .ok_or_else(|| Error::coercion(raw, target.name()))
        } else if target == TypeKey::of::<i16>() {
            raw.and_then(|r| r.parse::<i16>().ok())
                .map(ConfigValue::Short)
                .ok_or_else(|| Error::coercion(raw, target.name()))
        } else {
            Err(Error::unsupported_coercion_target(target.name()))
        }
    }
}
