//! Singleton store and teardown ordering

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::lifecycle::TeardownHook;
use crate::types::{Instance, TypeKey};

/// A registered instance returned by [`ComponentRegistry::find_assignable`]
#[derive(Clone)]
pub struct Match {
    /// Concrete type the instance was constructed as
    pub concrete: TypeKey,
    /// The shared instance
    pub instance: Instance,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("concrete", &self.concrete)
            .finish_non_exhaustive()
    }
}

struct Entry {
    concrete: TypeKey,
    instance: Instance,
    teardown: Option<TeardownHook>,
}

/// Constructed components in construction order
///
/// Holds at most one instance per concrete type. Grows while components are
/// resolved and is consumed by [`teardown`](Self::teardown).
#[derive(Default)]
pub struct ComponentRegistry {
    entries: Vec<Entry>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly constructed instance of `concrete`
    pub(crate) fn register(
        &mut self,
        concrete: TypeKey,
        instance: Instance,
        teardown: Option<TeardownHook>,
    ) {
        debug!(
            component = %concrete,
            position = self.entries.len(),
            "Registering component instance"
        );
        self.entries.push(Entry {
            concrete,
            instance,
            teardown,
        });
    }

    /// Registered instances whose concrete type is assignable to `target`
    pub fn find_assignable(&self, target: TypeKey, catalog: &Catalog) -> Vec<Match> {
        self.entries
            .iter()
            .filter(|e| catalog.is_assignable(e.concrete, target))
            .map(|e| Match {
                concrete: e.concrete,
                instance: Arc::clone(&e.instance),
            })
            .collect()
    }

    /// Whether an instance of exactly `concrete` is registered
    pub fn contains(&self, concrete: TypeKey) -> bool {
        self.entries.iter().any(|e| e.concrete == concrete)
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notify every instance with a teardown hook, in registration order
    ///
    /// The first hook that fails stops the walk; its error is returned as
    /// [`Error::Teardown`] and later hooks never run.
    pub fn teardown(self) -> Result<()> {
        info!(components = self.entries.len(), "Tearing down components");
        for entry in self.entries {
            let Some(hook) = entry.teardown else {
                continue;
            };
            debug!(component = %entry.concrete, "Running teardown hook");
            hook(&entry.instance).map_err(|source| {
                warn!(component = %entry.concrete, error = %source, "Teardown hook failed");
                Error::Teardown(source)
            })?;
        }
        Ok(())
    }
}
