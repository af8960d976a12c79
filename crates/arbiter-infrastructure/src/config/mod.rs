//! Configuration
//!
//! Stage-selected configuration files and the settings types read from them.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{LoggingConfig, Stage};
