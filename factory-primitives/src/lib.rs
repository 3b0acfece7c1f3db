//! Core shared types for the person factory.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod tag;

/// Error type and result alias shared across the factory crates.
pub use error::{Error, Result};
/// Identifiers for implementations and the instances they produce.
pub use ids::{ImplementationId, InstanceId};
/// Capability declarations carried by implementations.
pub use tag::{TypeTag, TypeTagBuilder, UNASSIGNED_NAME};
