//! # Arbiter infrastructure
//!
//! Technical concerns around the resolution engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Stage-selected TOML configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context for foreign errors |
//! | [`constants`] | File names, env vars and defaults |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{ConfigLoader, LoggingConfig, Stage};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
