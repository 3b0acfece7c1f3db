//! Runtime capability registry.
//!
//! Implementations declare the deciding-factor keys they answer to. A
//! [`Registry`] is built once from a [`Discovery`] backend and a
//! [`TagExtractor`], after which [`Registry::lookup`] hands out a freshly
//! constructed instance for any registered key.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod descriptor;
pub mod discovery;
mod error;
pub mod registry;

pub use catalog::{Catalog, TagExtractor};
pub use descriptor::{ConstructionError, Constructor, Descriptor, instantiate};
pub use discovery::{Discovery, ExplicitDiscovery, ScanDiscovery};
pub use error::{RegistryError, RegistryResult};
pub use registry::Registry;

pub use factory_primitives::{ImplementationId, TypeTag};
