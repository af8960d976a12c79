//! Dependency graph resolution
//!
//! For every request the resolver:
//!
//! 1. rejects types not declared as components
//! 2. picks the implementing type, enforcing the interface rule
//! 3. rejects a concrete type already on the current resolution path
//! 4. reuses the single registered instance assignable to the implementing
//!    type, failing if there are several
//! 5. otherwise selects the one public constructor
//! 6. resolves its parameters in order, recursively or from configuration
//! 7. runs the constructor body
//! 8. registers the new instance

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::binder::ConfigBinder;
use crate::catalog::Catalog;
use crate::constructor::{Arg, Args, Param};
use crate::error::{Error, Result};
use crate::registry::ComponentRegistry;
use crate::store::ConfigStore;
use crate::types::{Instance, TypeKey};

/// Concrete types under construction within one top-level request
///
/// Each recursion gets its own extended copy, so sibling dependencies never
/// see each other.
#[derive(Debug, Clone, Default)]
pub struct ResolutionPath {
    in_progress: HashSet<TypeKey>,
}

impl ResolutionPath {
    /// Empty path for a new top-level request
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is already being constructed on this path
    pub fn contains(&self, key: TypeKey) -> bool {
        self.in_progress.contains(&key)
    }

    /// Copy of this path with `key` added
    pub fn extended(&self, key: TypeKey) -> Self {
        let mut in_progress = self.in_progress.clone();
        in_progress.insert(key);
        Self { in_progress }
    }

    /// Number of types on the path
    pub fn len(&self) -> usize {
        self.in_progress.len()
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.in_progress.is_empty()
    }
}

/// Walks the dependency graph for one request against a registry
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    config: &'a ConfigStore,
    registry: &'a mut ComponentRegistry,
}

impl<'a> Resolver<'a> {
    /// Resolver over the given declarations, configuration and registry
    pub fn new(
        catalog: &'a Catalog,
        config: &'a ConfigStore,
        registry: &'a mut ComponentRegistry,
    ) -> Self {
        Self {
            catalog,
            config,
            registry,
        }
    }

    /// Obtain the instance for `T`, constructing it and its dependencies if
    /// needed
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let requested = TypeKey::of::<T>();
        let (concrete, view) = self.resolve_key(requested, &ResolutionPath::new())?;
        view.downcast::<Arc<T>>()
            .map(|component| *component)
            .map_err(|_| Error::not_assignable(requested.name(), concrete.name()))
    }

    /// Resolve `requested`, returning the concrete type of the instance and
    /// the instance as `Box<Arc<requested>>`
    fn resolve_key(
        &mut self,
        requested: TypeKey,
        path: &ResolutionPath,
    ) -> Result<(TypeKey, Box<dyn Any + Send + Sync>)> {
        let catalog = self.catalog;

        let descriptor = catalog
            .descriptor(requested)
            .ok_or_else(|| Error::not_a_component(requested.name()))?;
        let implementing = descriptor
            .implementing_type()
            .ok_or_else(|| Error::missing_implementation(requested.name()))?;
        if !catalog.is_assignable(implementing, requested) {
            return Err(Error::not_assignable(requested.name(), implementing.name()));
        }

        if path.contains(implementing) {
            return Err(Error::circular_dependency(implementing.name()));
        }
        let path = path.extended(implementing);

        let matches = self.registry.find_assignable(implementing, catalog);
        let (concrete, instance) = match matches.as_slice() {
            [] => (implementing, self.construct(implementing, &path)?),
            [existing] => {
                debug!(
                    component = %requested,
                    concrete = %existing.concrete,
                    "Reusing registered instance"
                );
                (existing.concrete, Arc::clone(&existing.instance))
            }
            many => {
                return Err(Error::ambiguous_component(requested.name(), many.len()));
            }
        };

        let view = catalog
            .view(&instance, concrete, implementing, requested)
            .ok_or_else(|| Error::not_assignable(requested.name(), concrete.name()))?;
        Ok((concrete, view))
    }

    fn construct(&mut self, implementing: TypeKey, path: &ResolutionPath) -> Result<Instance> {
        let catalog = self.catalog;

        let constructors = catalog.public_constructors(implementing);
        let [factory] = constructors.as_slice() else {
            return Err(Error::no_single_constructor(
                implementing.name(),
                constructors.len(),
            ));
        };

        let mut args = Vec::with_capacity(factory.params().len());
        for param in factory.params() {
            let arg = match param {
                Param::Config { key, target } => {
                    Arg::Config(ConfigBinder::bind(self.config.get(key), *target)?)
                }
                Param::Component(dependency) => {
                    let (_, view) = self.resolve_key(*dependency, path)?;
                    Arg::Component(view)
                }
            };
            args.push(arg);
        }

        debug!(component = %implementing, depth = path.len(), "Constructing component");
        let instance = factory.invoke(Args::new(args)).map_err(Error::Component)?;

        self.registry.register(
            implementing,
            Arc::clone(&instance),
            catalog.teardown_hook(implementing),
        );
        Ok(instance)
    }
}
