//! Constructor declarations and argument slots
//!
//! A [`Constructor`] is the factory-function replacement for a reflected
//! constructor: an ordered parameter list plus a body that receives the
//! resolved arguments through [`Args`], in the same order.
//!
//! ```ignore
//! Constructor::new(|args| {
//!     Ok(Mailer {
//!         transport: args.component()?,
//!         host: args.config()?,
//!         port: args.config()?,
//!     })
//! })
//! .inject::<dyn Transport>()
//! .config::<String>("smtp-host")
//! .config::<i16>("smtp-port")
//! ```

use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

use crate::binder::{ConfigValue, FromConfigValue};
use crate::error::BoxError;
use crate::types::{Instance, TypeKey};

/// Constructor parameter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Dependency resolved through the container
    Component(TypeKey),
    /// Value read from the configuration store and coerced to `target`
    Config {
        /// Configuration key
        key: String,
        /// Declared parameter type
        target: TypeKey,
    },
}

/// Constructor visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Usable by the container
    #[default]
    Public,
    /// Declared but never selected for construction
    Private,
}

/// Error raised when a constructor body reads its arguments incorrectly
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// More arguments read than parameters declared
    #[error("Argument {position} was read but only {declared} parameters are declared")]
    Exhausted {
        /// Zero-based slot index
        position: usize,
        /// Declared parameter count
        declared: usize,
    },
    /// Slot holds a value of another type
    #[error("Argument {position} is not a {expected}")]
    Mismatch {
        /// Zero-based slot index
        position: usize,
        /// Type the body asked for
        expected: &'static str,
    },
}

pub(crate) enum Arg {
    /// `Box<Arc<T>>` for the parameter type `T`
    Component(Box<dyn Any + Send + Sync>),
    Config(ConfigValue),
}

/// Resolved constructor arguments, consumed in declaration order
pub struct Args {
    slots: std::vec::IntoIter<Arg>,
    position: usize,
    declared: usize,
}

impl Args {
    pub(crate) fn new(slots: Vec<Arg>) -> Self {
        Self {
            declared: slots.len(),
            slots: slots.into_iter(),
            position: 0,
        }
    }

    /// Take the next argument as an injected component
    pub fn component<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>, BoxError> {
        let position = self.position;
        match self.next_slot()? {
            Arg::Component(view) => view
                .downcast::<Arc<T>>()
                .map(|component| *component)
                .map_err(|_| mismatch::<T>(position)),
            Arg::Config(_) => Err(mismatch::<T>(position)),
        }
    }

    /// Take the next argument as a configuration value
    pub fn config<T: FromConfigValue>(&mut self) -> Result<T, BoxError> {
        let position = self.position;
        match self.next_slot()? {
            Arg::Config(value) => {
                T::from_config_value(value).ok_or_else(|| mismatch::<T>(position))
            }
            Arg::Component(_) => Err(mismatch::<T>(position)),
        }
    }

    /// Number of arguments not yet read
    pub fn remaining(&self) -> usize {
        self.slots.len()
    }

    fn next_slot(&mut self) -> Result<Arg, BoxError> {
        let slot = self.slots.next().ok_or(ArgumentError::Exhausted {
            position: self.position,
            declared: self.declared,
        })?;
        self.position += 1;
        Ok(slot)
    }
}

fn mismatch<T: ?Sized>(position: usize) -> BoxError {
    Box::new(ArgumentError::Mismatch {
        position,
        expected: std::any::type_name::<T>(),
    })
}

type Body<C> = Box<dyn Fn(&mut Args) -> Result<C, BoxError> + Send + Sync>;

/// Constructor for the component type `C`
pub struct Constructor<C> {
    visibility: Visibility,
    params: Vec<Param>,
    body: Body<C>,
}

impl<C: Send + Sync + 'static> Constructor<C> {
    /// Public constructor with no parameters yet
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut Args) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        Self {
            visibility: Visibility::Public,
            params: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Mark the constructor private
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Append a component dependency of type `T`
    pub fn inject<T: ?Sized + 'static>(mut self) -> Self {
        self.params.push(Param::Component(TypeKey::of::<T>()));
        self
    }

    /// Append a parameter of type `T` bound to configuration `key`
    pub fn config<T: 'static>(mut self, key: impl Into<String>) -> Self {
        self.params.push(Param::Config {
            key: key.into(),
            target: TypeKey::of::<T>(),
        });
        self
    }

    /// Declared parameters in order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether the container may select this constructor
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub(crate) fn erase(self) -> Factory {
        let body = self.body;
        Factory {
            visibility: self.visibility,
            params: self.params,
            body: Box::new(move |args| body(args).map(|component| Arc::new(component) as Instance)),
        }
    }
}

/// Type-erased constructor stored in the catalog
pub(crate) struct Factory {
    visibility: Visibility,
    params: Vec<Param>,
    body: Body<Instance>,
}

impl Factory {
    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub(crate) fn invoke(&self, mut args: Args) -> Result<Instance, BoxError> {
        (self.body)(&mut args)
    }
}
