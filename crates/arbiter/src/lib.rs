//! # Arbiter
//!
//! A minimal dependency-injection container. Components are declared in a
//! [`Catalog`] with explicit constructors; the [`Container`] builds each one
//! on first request, resolving constructor dependencies recursively and
//! binding scalar parameters from stage-selected configuration. Every
//! component is a singleton per concrete type, and components with a
//! [`Teardown`] hook are notified in construction order on shutdown.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use arbiter::prelude::*;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Configured {
//!     greeting: String,
//! }
//!
//! impl Greeter for Configured {
//!     fn greet(&self) -> String {
//!         self.greeting.clone()
//!     }
//! }
//!
//! # fn main() -> arbiter::Result<()> {
//! let catalog = Catalog::builder()
//!     .interface_implemented_by::<dyn Greeter, Configured>()
//!     .implementation(
//!         Component::<Configured>::new()
//!             .constructor(
//!                 Constructor::new(|args| Ok(Configured { greeting: args.config()? }))
//!                     .config::<String>("greeting"),
//!             )
//!             .satisfies(|c| c as Arc<dyn Greeter>),
//!     )
//!     .build();
//!
//! let loader = ConfigLoader::new().with_stage(Stage::from_env());
//! let container = arbiter::bootstrap(catalog, &loader)?;
//! let greeter = container.resolve::<dyn Greeter>()?;
//! println!("{}", greeter.greet());
//! container.teardown()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

pub use arbiter_domain::{
    Args, BoxError, Catalog, CatalogBuilder, Component, ComponentDescriptor, ConfigStore,
    ConfigValue, Constructor, Container, Error, Result, Shape, Teardown, TypeKey,
};
pub use arbiter_infrastructure::{ConfigLoader, LoggingConfig, Stage, init_logging};

/// Domain layer, for the registry and resolver building blocks
pub use arbiter_domain as domain;
/// Infrastructure layer
pub use arbiter_infrastructure as infrastructure;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        Args, BoxError, Catalog, Component, ConfigLoader, Constructor, Container, Stage, Teardown,
    };
}

/// Load the configuration selected by `loader` and create a container
///
/// A missing configuration file leaves the store empty; a malformed one fails
/// with [`Error::Configuration`].
pub fn bootstrap(catalog: impl Into<Arc<Catalog>>, loader: &ConfigLoader) -> Result<Container> {
    let config = loader.load()?;
    info!(
        stage = %loader.stage(),
        keys = config.len(),
        "Creating component container"
    );
    Ok(Container::new(catalog, config))
}
