//! Default wiring from configuration to a ready [`PersonFactory`].

use std::fmt;

use factory_config::{DiscoveryStrategy, FactoryConfig};
use factory_registry::{
    Catalog, Discovery, ExplicitDiscovery, Registry, RegistryResult, ScanDiscovery,
};
use tracing::info;

use crate::{Person, plugin};

/// Builds the discovery backend selected by `config`.
#[must_use]
pub fn discovery_for<'a>(
    config: &FactoryConfig,
    catalog: &'a Catalog<dyn Person>,
) -> Box<dyn Discovery + 'a> {
    match &config.discovery {
        DiscoveryStrategy::Scan => Box::new(ScanDiscovery::new(catalog, config.base_module.clone())),
        DiscoveryStrategy::Explicit { implementations } => {
            Box::new(ExplicitDiscovery::new(implementations.clone()))
        }
    }
}

/// Produces a new [`Person`] for a deciding-factor key.
pub struct PersonFactory {
    registry: Registry<dyn Person>,
}

impl fmt::Debug for PersonFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonFactory")
            .field("keys", &self.registry.keys())
            .finish()
    }
}

impl PersonFactory {
    /// Scans the built-in implementations with the default configuration.
    ///
    /// # Errors
    ///
    /// Propagates any build-phase [`crate::RegistryError`].
    pub fn with_defaults() -> RegistryResult<Self> {
        Self::from_config(&FactoryConfig::default())
    }

    /// Discovers implementations as configured and builds the registry.
    ///
    /// # Errors
    ///
    /// Any discovery, resolution, or metadata failure aborts the build.
    pub fn from_config(config: &FactoryConfig) -> RegistryResult<Self> {
        let catalog = plugin::catalog()?;
        let discovery = discovery_for(config, &catalog);
        let registry = Registry::discover(discovery.as_ref(), &catalog)?;
        info!(
            discovery = config.discovery.label(),
            keys = registry.len(),
            "person factory ready"
        );
        Ok(Self { registry })
    }

    /// Wraps an already built registry.
    #[must_use]
    pub fn from_registry(registry: Registry<dyn Person>) -> Self {
        Self { registry }
    }

    /// Returns a new person for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::UnknownKey`] for an unregistered key or
    /// [`crate::RegistryError::ConstructionFailed`] if construction fails.
    pub fn person_for(&self, key: &str) -> RegistryResult<Box<dyn Person>> {
        self.registry.lookup(key)
    }

    /// Underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry<dyn Person> {
        &self.registry
    }
}
