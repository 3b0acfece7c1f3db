//! Errors produced while building and querying a registry.

use factory_primitives::ImplementationId;
use thiserror::Error;

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced by discovery, registration, and lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No implementation is registered under the requested key.
    #[error("no implementation registered for key `{key}`")]
    UnknownKey {
        /// The key supplied by the caller.
        key: String,
    },

    /// The implementation exists but carries no usable capability declaration.
    #[error("implementation `{id}` has no capability declaration: {reason}")]
    MetadataMissing {
        /// Implementation lacking the declaration.
        id: ImplementationId,
        /// Human-readable detail.
        reason: String,
    },

    /// The identifier does not name any known implementation.
    #[error("implementation `{id}` could not be resolved")]
    ResolutionFailed {
        /// The unresolvable identifier.
        id: ImplementationId,
    },

    /// The implementation's constructor failed.
    #[error("failed to construct `{id}`: {reason}")]
    ConstructionFailed {
        /// Implementation whose constructor failed.
        id: ImplementationId,
        /// Human-readable detail.
        reason: String,
    },

    /// Two catalog entries share one identifier.
    #[error("implementation `{id}` is already in the catalog")]
    DuplicateImplementation {
        /// The repeated identifier.
        id: ImplementationId,
    },

    /// The discovery backend could not enumerate implementations.
    #[error("discovery failed: {reason}")]
    Discovery {
        /// Human-readable detail.
        reason: String,
    },

    /// A primitive type failed validation.
    #[error(transparent)]
    Primitive(#[from] factory_primitives::Error),
}

impl RegistryError {
    /// Convenience helper to construct discovery errors.
    #[must_use]
    pub fn discovery(reason: impl Into<String>) -> Self {
        Self::Discovery {
            reason: reason.into(),
        }
    }

    /// Whether the error aborts a registry build, as opposed to failing a
    /// single lookup.
    #[must_use]
    pub fn is_build_error(&self) -> bool {
        !matches!(
            self,
            Self::UnknownKey { .. } | Self::ConstructionFailed { .. }
        )
    }
}
