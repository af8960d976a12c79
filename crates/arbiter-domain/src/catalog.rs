//! Component declaration catalog
//!
//! Stands in for runtime annotations and reflection. Every fact the resolver
//! needs about a type is declared up front and frozen into a [`Catalog`]:
//!
//! - whether a type is a component, and its implementing type
//! - the constructors of each concrete type
//! - which other types a concrete type can be viewed as
//! - whether it has a teardown hook
//!
//! ## Usage
//!
//! ```ignore
//! let catalog = Catalog::builder()
//!     .interface_implemented_by::<dyn Greeter, EnglishGreeter>()
//!     .component(
//!         Component::<EnglishGreeter>::new()
//!             .constructor(Constructor::new(|_| Ok(EnglishGreeter)))
//!             .satisfies(|g| g as Arc<dyn Greeter>),
//!     )
//!     .build();
//! ```
//!
//! Assignability is never inferred. A concrete type `C` is assignable to `T`
//! only when `C` is `T`, or when `C` declared `satisfies::<T>` or
//! `extends::<T>` directly. Any declared view also lets a `C` instance stand in
//! for `T` when `T` is the implementing type of another request.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::constructor::{Constructor, Factory};
use crate::lifecycle::{run_teardown, Teardown, TeardownHook};
use crate::types::{Instance, TypeKey};

/// Produces `Box<Arc<T>>` for a target type `T` from an erased instance
type ViewFn = Box<dyn Fn(&Instance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Turns a `Box<Arc<C>>` view back into an erased instance of `C`
type EraseFn = fn(Box<dyn Any + Send + Sync>) -> Option<Instance>;

/// How a component type may be instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A concrete type, its own implementation unless overridden
    Concrete,
    /// An interface-like type that needs an implementing type
    Interface,
}

/// Component declaration for a requested type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// The type callers ask for
    pub requested: TypeKey,
    /// Concrete or interface-like
    pub shape: Shape,
    /// Explicit implementing type, if declared
    pub implemented_by: Option<TypeKey>,
}

impl ComponentDescriptor {
    /// Type to instantiate, `None` for an interface without an override
    pub fn implementing_type(&self) -> Option<TypeKey> {
        match (self.implemented_by, self.shape) {
            (Some(implementation), _) => Some(implementation),
            (None, Shape::Concrete) => Some(self.requested),
            (None, Shape::Interface) => None,
        }
    }
}

/// Declaration of a concrete type: constructors, supertypes and teardown
pub struct Component<C> {
    implemented_by: Option<TypeKey>,
    constructors: Vec<Constructor<C>>,
    views: Vec<(TypeKey, ViewFn)>,
    teardown: Option<TeardownHook>,
}

impl<C: Send + Sync + 'static> Component<C> {
    /// Empty declaration for `C`
    pub fn new() -> Self {
        Self {
            implemented_by: None,
            constructors: Vec::new(),
            views: Vec::new(),
            teardown: None,
        }
    }

    /// Add a constructor
    pub fn constructor(mut self, constructor: Constructor<C>) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Instantiate `D` whenever `C` is requested
    ///
    /// Only meaningful when registered with [`CatalogBuilder::component`].
    /// `D` has to declare `extends::<C>` or `satisfies::<C>` to be accepted.
    pub fn implemented_by<D: 'static>(mut self) -> Self {
        self.implemented_by = Some(TypeKey::of::<D>());
        self
    }

    /// Declare that `C` can be used where a `T` is requested
    pub fn satisfies<T, F>(mut self, view: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<T> + Send + Sync + 'static,
    {
        self.views.push((TypeKey::of::<T>(), view_fn(view)));
        self
    }

    /// Declare the concrete supertype `B`
    ///
    /// [`satisfies`](Self::satisfies) restricted to sized targets, typically
    /// returning a shared `B` held by `C`.
    pub fn extends<B, F>(self, upcast: F) -> Self
    where
        B: Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<B> + Send + Sync + 'static,
    {
        self.satisfies(upcast)
    }

    /// Run [`Teardown::on_teardown`] when the container shuts down
    pub fn with_teardown(mut self) -> Self
    where
        C: Teardown,
    {
        self.teardown = Some(run_teardown::<C>);
        self
    }
}

impl<C: Send + Sync + 'static> Default for Component<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn view_fn<C, T, F>(view: F) -> ViewFn
where
    C: Send + Sync + 'static,
    T: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<C>) -> Arc<T> + Send + Sync + 'static,
{
    Box::new(move |instance: &Instance| {
        let concrete = Arc::clone(instance).downcast::<C>().ok()?;
        Some(Box::new(view(concrete)) as Box<dyn Any + Send + Sync>)
    })
}

fn identity<C>(component: Arc<C>) -> Arc<C> {
    component
}

fn erase<C: Send + Sync + 'static>(view: Box<dyn Any + Send + Sync>) -> Option<Instance> {
    view.downcast::<Arc<C>>()
        .ok()
        .map(|component| *component as Instance)
}

struct Implementation {
    constructors: Vec<Factory>,
    teardown: Option<TeardownHook>,
    erase: EraseFn,
}

/// Frozen declaration tables queried by the resolver
#[derive(Default)]
pub struct Catalog {
    descriptors: HashMap<TypeKey, ComponentDescriptor>,
    implementations: HashMap<TypeKey, Implementation>,
    /// Keyed by (concrete, target)
    views: HashMap<(TypeKey, TypeKey), ViewFn>,
}

impl Catalog {
    /// Start declaring components
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Whether `key` was declared as a component
    pub fn is_component(&self, key: TypeKey) -> bool {
        self.descriptors.contains_key(&key)
    }

    /// Component declaration for `key`
    pub fn descriptor(&self, key: TypeKey) -> Option<&ComponentDescriptor> {
        self.descriptors.get(&key)
    }

    /// Declared implementing type override for `key`
    pub fn implementing_type_override(&self, key: TypeKey) -> Option<TypeKey> {
        self.descriptors.get(&key).and_then(|d| d.implemented_by)
    }

    /// Whether an instance of `concrete` can be used as a `target`
    pub fn is_assignable(&self, concrete: TypeKey, target: TypeKey) -> bool {
        concrete == target || self.views.contains_key(&(concrete, target))
    }

    /// Number of public constructors declared for `key`
    pub fn public_constructor_count(&self, key: TypeKey) -> usize {
        self.public_constructors(key).len()
    }

    /// Whether instances of `key` get a teardown notification
    pub fn has_teardown_hook(&self, key: TypeKey) -> bool {
        self.teardown_hook(key).is_some()
    }

    pub(crate) fn public_constructors(&self, key: TypeKey) -> Vec<&Factory> {
        self.implementations
            .get(&key)
            .map(|i| i.constructors.iter().filter(|c| c.is_public()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn teardown_hook(&self, key: TypeKey) -> Option<TeardownHook> {
        self.implementations.get(&key).and_then(|i| i.teardown)
    }

    /// View an instance of `concrete` as `requested`, yielding `Box<Arc<requested>>`
    ///
    /// Uses a direct declaration when there is one, otherwise goes through the
    /// implementing type: `concrete` viewed as `implementing`, re-erased, then
    /// viewed as `requested`.
    pub(crate) fn view(
        &self,
        instance: &Instance,
        concrete: TypeKey,
        implementing: TypeKey,
        requested: TypeKey,
    ) -> Option<Box<dyn Any + Send + Sync>> {
        if let Some(view) = self.views.get(&(concrete, requested)) {
            return view(instance);
        }
        let as_implementing = self.views.get(&(concrete, implementing))?(instance)?;
        let erase = self.implementations.get(&implementing)?.erase;
        self.views.get(&(implementing, requested))?(&erase(as_implementing)?)
    }
}

/// Builder for [`Catalog`]
#[derive(Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Declare the concrete component `C`
    pub fn component<C: Send + Sync + 'static>(mut self, component: Component<C>) -> Self {
        let key = TypeKey::of::<C>();
        self.declare(ComponentDescriptor {
            requested: key,
            shape: Shape::Concrete,
            implemented_by: component.implemented_by,
        });
        self.implementation(component)
    }

    /// Declare an interface component with no implementing type
    pub fn interface<I: ?Sized + 'static>(mut self) -> Self {
        self.declare(ComponentDescriptor {
            requested: TypeKey::of::<I>(),
            shape: Shape::Interface,
            implemented_by: None,
        });
        self
    }

    /// Declare an interface component implemented by `C`
    pub fn interface_implemented_by<I: ?Sized + 'static, C: 'static>(mut self) -> Self {
        self.declare(ComponentDescriptor {
            requested: TypeKey::of::<I>(),
            shape: Shape::Interface,
            implemented_by: Some(TypeKey::of::<C>()),
        });
        self
    }

    /// Record constructors, supertypes and teardown for `C` without making
    /// `C` itself requestable
    pub fn implementation<C: Send + Sync + 'static>(mut self, component: Component<C>) -> Self {
        let key = TypeKey::of::<C>();
        let catalog = &mut self.catalog;

        catalog.views.retain(|(concrete, _), _| *concrete != key);

        catalog.views.insert((key, key), view_fn(identity::<C>));
        for (target, view) in component.views {
            catalog.views.insert((key, target), view);
        }

        let implementation = Implementation {
            constructors: component
                .constructors
                .into_iter()
                .map(Constructor::erase)
                .collect(),
            teardown: component.teardown,
            erase: erase::<C>,
        };
        if catalog.implementations.insert(key, implementation).is_some() {
            debug!(component = %key, "Replacing implementation declaration");
        }
        self
    }

    /// Freeze the declarations
    pub fn build(self) -> Catalog {
        debug!(
            components = self.catalog.descriptors.len(),
            implementations = self.catalog.implementations.len(),
            "Component catalog built"
        );
        self.catalog
    }

    fn declare(&mut self, descriptor: ComponentDescriptor) {
        let key = descriptor.requested;
        if self.catalog.descriptors.insert(key, descriptor).is_some() {
            debug!(component = %key, "Replacing component declaration");
        }
    }
}
