//! Configuration management for the person factory.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `PERSON_FACTORY_*` environment variables.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::{ENV_BASE_MODULE, ENV_DISCOVERY, ENV_IMPLEMENTATIONS, load};
pub use schema::{DEFAULT_BASE_MODULE, DiscoveryStrategy, FactoryConfig};
