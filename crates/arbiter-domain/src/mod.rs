//! # Arbiter domain
//!
//! Resolution engine of the Arbiter dependency-injection container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Component declarations: descriptors, constructors, supertypes |
//! | [`constructor`] | Constructor parameters and argument slots |
//! | [`binder`] | Configuration value coercion |
//! | [`store`] | Read-only configuration table |
//! | [`registry`] | Constructed singletons and teardown ordering |
//! | [`resolver`] | Recursive graph walk with cycle detection |
//! | [`container`] | Thread-safe container tying the above together |
//! | [`error`] | Error taxonomy |
//!
//! Nothing in this crate performs I/O; configuration arrives as a
//! [`ConfigStore`] built elsewhere.

pub mod binder;
pub mod catalog;
pub mod constructor;
pub mod container;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod types;

pub use binder::{ConfigBinder, ConfigValue, FromConfigValue};
pub use catalog::{Catalog, CatalogBuilder, Component, ComponentDescriptor, Shape};
pub use constructor::{ArgumentError, Args, Constructor, Param, Visibility};
pub use container::Container;
pub use error::{BoxError, Error, Result};
pub use lifecycle::Teardown;
pub use registry::{ComponentRegistry, Match};
pub use resolver::{ResolutionPath, Resolver};
pub use store::ConfigStore;
pub use types::{Instance, TypeKey};
