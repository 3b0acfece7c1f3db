//! Resolved implementations and the instantiator.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use factory_primitives::{ImplementationId, TypeTag};
use thiserror::Error;

use crate::error::{RegistryError, RegistryResult};

/// Error returned by a fallible constructor.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct ConstructionError {
    reason: String,
}

impl ConstructionError {
    /// Creates a construction error from the supplied reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Zero-argument factory producing a boxed `T`.
pub struct Constructor<T: ?Sized>(fn() -> Result<Box<T>, ConstructionError>);

impl<T: ?Sized> Constructor<T> {
    /// Wraps a factory function.
    #[must_use]
    pub const fn new(factory: fn() -> Result<Box<T>, ConstructionError>) -> Self {
        Self(factory)
    }

    fn call(self) -> Result<Box<T>, ConstructionError> {
        (self.0)()
    }
}

impl<T: ?Sized> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Constructor<T> {}

impl<T: ?Sized> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constructor(..)")
    }
}

/// One discoverable implementation: where it came from, what it declares,
/// and how to build it.
pub struct Descriptor<T: ?Sized> {
    id: ImplementationId,
    tag: TypeTag,
    constructor: Constructor<T>,
}

impl<T: ?Sized> Descriptor<T> {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(id: ImplementationId, tag: TypeTag, constructor: Constructor<T>) -> Self {
        Self {
            id,
            tag,
            constructor,
        }
    }

    /// Identifier of the implementation.
    #[must_use]
    pub fn id(&self) -> &ImplementationId {
        &self.id
    }

    /// Declared display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.tag.name()
    }

    /// Declared keys, in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.tag.keys()
    }

    /// Full declaration.
    #[must_use]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }
}

impl<T: ?Sized> Clone for Descriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            tag: self.tag.clone(),
            constructor: self.constructor,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("id", &self.id)
            .field("name", &self.tag.name())
            .field("keys", &self.tag.keys())
            .finish_non_exhaustive()
    }
}

/// Produces a new instance from a descriptor.
///
/// A constructor that returns an error or panics is reported as
/// [`RegistryError::ConstructionFailed`].
///
/// # Errors
///
/// Returns [`RegistryError::ConstructionFailed`] when construction does not
/// complete.
pub fn instantiate<T: ?Sized>(descriptor: &Descriptor<T>) -> RegistryResult<Box<T>> {
    let constructor = descriptor.constructor;
    match panic::catch_unwind(AssertUnwindSafe(|| constructor.call())) {
        Ok(Ok(instance)) => Ok(instance),
        Ok(Err(err)) => Err(RegistryError::ConstructionFailed {
            id: descriptor.id.clone(),
            reason: err.reason,
        }),
        Err(payload) => Err(RegistryError::ConstructionFailed {
            id: descriptor.id.clone(),
            reason: format!("constructor panicked: {}", panic_message(payload.as_ref())),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
