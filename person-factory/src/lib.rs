//! Person factory SDK facade.
//!
//! Bundles the factory crates behind feature flags so downstream users can
//! pull in only the registry machinery or the full person factory.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use factory_primitives as primitives;

/// Generic key to constructor registry (enabled by `registry` feature).
#[cfg(feature = "registry")]
pub use factory_registry as registry;

/// Configuration management (enabled by `config` feature).
#[cfg(feature = "config")]
pub use factory_config as config;

/// Person abstraction and default factory (enabled by `persons` feature).
#[cfg(feature = "persons")]
pub use persons;

#[cfg(feature = "persons")]
pub use persons::{Person, PersonFactory, person_type};
