//! The component container
//!
//! ```ignore
//! let container = Container::new(catalog, config);
//! let mailer: Arc<Mailer> = container.resolve()?;
//! // ...
//! container.teardown()?;
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::error;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::registry::ComponentRegistry;
use crate::resolver::Resolver;
use crate::store::ConfigStore;

/// Singleton container over a component catalog
///
/// Resolution holds one lock for the whole request, so the lookup and the
/// registration of a new instance happen atomically even when the container
/// is shared between threads.
///
/// [`teardown`](Self::teardown) consumes the container. A container dropped
/// without it still notifies its components; a failing hook is then logged
/// instead of returned.
pub struct Container {
    catalog: Arc<Catalog>,
    config: ConfigStore,
    registry: Mutex<ComponentRegistry>,
}

impl Container {
    /// Create an empty container
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: ConfigStore) -> Self {
        Self {
            catalog: catalog.into(),
            config,
            registry: Mutex::new(ComponentRegistry::new()),
        }
    }

    /// Obtain the singleton for `T`
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let mut registry = self.lock_registry();
        Resolver::new(&self.catalog, &self.config, &mut registry).resolve::<T>()
    }

    /// Declarations this container resolves against
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configuration consulted for config-bound parameters
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Number of constructed components
    pub fn instance_count(&self) -> usize {
        self.lock_registry().len()
    }

    /// Notify components in construction order and shut the container down
    ///
    /// Stops at the first failing hook and returns its error.
    pub fn teardown(mut self) -> Result<()> {
        self.take_registry().teardown()
    }

    fn lock_registry(&self) -> MutexGuard<'_, ComponentRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_registry(&mut self) -> ComponentRegistry {
        std::mem::take(
            self.registry
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        let registry = self.take_registry();
        if registry.is_empty() {
            return;
        }
        if let Err(e) = registry.teardown() {
            error!(error = %e, "Component teardown failed while dropping container");
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("config_keys", &self.config.len())
            .field("instances", &self.instance_count())
            .finish()
    }
}
