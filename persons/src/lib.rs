//! Person abstraction and the factory that picks an implementation by key.
//!
//! Implementations declare their keys with [`person_type`]; the
//! [`PersonFactory`] discovers them, builds a registry once, and hands out a
//! fresh person for every lookup.

#![warn(missing_docs, clippy::pedantic)]

// Lets `#[person_type]` expansions use `::persons::` paths inside this crate.
extern crate self as persons;

pub mod builtin;
mod factory;
mod person;
pub mod plugin;

pub use factory::{PersonFactory, discovery_for};
pub use factory_config::{DiscoveryStrategy, FactoryConfig};
pub use factory_macros::person_type;
pub use factory_primitives::{ImplementationId, InstanceId, TypeTag};
pub use factory_registry::{ConstructionError, RegistryError, RegistryResult};
pub use person::Person;

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
