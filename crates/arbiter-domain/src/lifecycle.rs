//! Component teardown capability

use crate::error::BoxError;
use crate::types::Instance;

/// Shutdown notification for container-managed components
///
/// Components opt in with [`Component::with_teardown`](crate::catalog::Component::with_teardown).
/// Hooks run once, in construction order, when the container is torn down.
/// An error returned here stops the remaining hooks from running.
pub trait Teardown: Send + Sync {
    /// Release whatever the component holds
    fn on_teardown(&self) -> Result<(), BoxError>;
}

/// Type-erased teardown entry point recorded for a concrete type
pub(crate) type TeardownHook = fn(&Instance) -> Result<(), BoxError>;

pub(crate) fn run_teardown<C: Teardown + 'static>(instance: &Instance) -> Result<(), BoxError> {
    match instance.downcast_ref::<C>() {
        Some(component) => component.on_teardown(),
        None => Ok(()),
    }
}
