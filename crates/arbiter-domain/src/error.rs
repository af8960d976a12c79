//! Error handling types
//!
//! Container-contract violations each have their own variant so callers can
//! match on them. Failures raised by component code itself (a constructor body
//! or a teardown hook) are carried in [`Error::Component`] and
//! [`Error::Teardown`] without any added message, so the original error can be
//! recovered with [`Error::into_user_error`].

use thiserror::Error;

/// Boxed error produced by component code
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Arbiter container
#[derive(Error, Debug)]
pub enum Error {
    /// The requested type was never declared as a component
    #[error("Component not declared: {component}")]
    NotAComponent {
        /// Name of the requested type
        component: String,
    },

    /// An interface component has no implementing type
    #[error("Interface component must declare an implementing type: {component}")]
    MissingImplementation {
        /// Name of the interface type
        component: String,
    },

    /// The implementing type cannot be viewed as the requested type
    #[error("{component} is not assignable from {implementation}")]
    NotAssignable {
        /// Name of the requested type
        component: String,
        /// Name of the declared implementing type
        implementation: String,
    },

    /// A concrete type reappeared in its own resolution path
    #[error("Circular reference detected at: {component}")]
    CircularDependency {
        /// Name of the concrete type seen twice
        component: String,
    },

    /// More than one registered instance satisfies the request
    #[error("Ambiguous injection for: {component} ({matches} candidates)")]
    AmbiguousComponent {
        /// Name of the requested type
        component: String,
        /// Number of registered instances that matched
        matches: usize,
    },

    /// The implementing type does not have exactly one public constructor
    #[error("No single public constructor for: {component} (found {found})")]
    NoSingleConstructor {
        /// Name of the implementing type
        component: String,
        /// Number of public constructors declared
        found: usize,
    },

    /// A configuration value could not be parsed into the parameter type
    #[error("Unable to cast property '{raw}' to parameter '{target}'")]
    CoercionError {
        /// The raw configuration value, `<absent>` when the key was missing
        raw: String,
        /// Name of the parameter type
        target: String,
    },

    /// The parameter type has no configuration coercion
    #[error("Unknown cast to parameter '{target}'")]
    UnsupportedCoercionTarget {
        /// Name of the parameter type
        target: String,
    },

    /// Failure raised by a component constructor body
    #[error(transparent)]
    Component(BoxError),

    /// Failure raised by a component teardown hook
    #[error(transparent)]
    Teardown(BoxError),

    /// Configuration loading error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    /// Create a not-a-component error
    pub fn not_a_component<S: Into<String>>(component: S) -> Self {
        Self::NotAComponent {
            component: component.into(),
        }
    }

    /// Create a missing implementation error
    pub fn missing_implementation<S: Into<String>>(component: S) -> Self {
        Self::MissingImplementation {
            component: component.into(),
        }
    }

    /// Create a not-assignable error
    pub fn not_assignable<S: Into<String>, I: Into<String>>(
        component: S,
        implementation: I,
    ) -> Self {
        Self::NotAssignable {
            component: component.into(),
            implementation: implementation.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular_dependency<S: Into<String>>(component: S) -> Self {
        Self::CircularDependency {
            component: component.into(),
        }
    }

    /// Create an ambiguous component error
    pub fn ambiguous_component<S: Into<String>>(component: S, matches: usize) -> Self {
        Self::AmbiguousComponent {
            component: component.into(),
            matches,
        }
    }

    /// Create a constructor count error
    pub fn no_single_constructor<S: Into<String>>(component: S, found: usize) -> Self {
        Self::NoSingleConstructor {
            component: component.into(),
            found,
        }
    }

    /// Create a coercion error for a raw value that may be absent
    pub fn coercion<S: Into<String>>(raw: Option<&str>, target: S) -> Self {
        Self::CoercionError {
            raw: raw.unwrap_or("<absent>").to_string(),
            target: target.into(),
        }
    }

    /// Create an unsupported coercion target error
    pub fn unsupported_coercion_target<S: Into<String>>(target: S) -> Self {
        Self::UnsupportedCoercionTarget {
            target: target.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the container rejected the component graph, as opposed to
    /// component code failing on its own
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            Self::Component(_) | Self::Teardown(_) | Self::Configuration { .. }
        )
    }

    /// Recover the error raised by a constructor body or teardown hook
    pub fn into_user_error(self) -> std::result::Result<BoxError, Self> {
        match self {
            Self::Component(source) | Self::Teardown(source) => Ok(source),
            other => Err(other),
        }
    }
}
