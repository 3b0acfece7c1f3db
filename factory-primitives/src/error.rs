//! Shared error definitions for factory primitives.

use thiserror::Error;

/// Result alias used throughout the factory crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating factory primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Implementation identifier failed validation.
    #[error("invalid implementation id `{id}`: {reason}")]
    InvalidImplementationId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Type tag declaration failed validation.
    #[error("invalid type tag: {reason}")]
    InvalidTag {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
