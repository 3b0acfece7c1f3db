//! Discovery backends: enumerate the implementations a registry is built from.

use factory_primitives::ImplementationId;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::RegistryResult;

/// Enumerates implementation identifiers believed to declare a capability tag.
///
/// The order returned is the order in which the registry processes
/// identifiers, so it decides which implementation wins a shared key.
pub trait Discovery {
    /// Returns the identifiers to register.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::Discovery`] when enumeration fails.
    fn discover(&self) -> RegistryResult<Vec<ImplementationId>>;
}

impl<F> Discovery for F
where
    F: Fn() -> RegistryResult<Vec<ImplementationId>>,
{
    fn discover(&self) -> RegistryResult<Vec<ImplementationId>> {
        (self)()
    }
}

/// Discovery over a fixed, ordered list of identifiers.
#[derive(Clone, Debug, Default)]
pub struct ExplicitDiscovery {
    ids: Vec<ImplementationId>,
}

impl ExplicitDiscovery {
    /// Creates a backend returning `ids` verbatim.
    #[must_use]
    pub fn new(ids: Vec<ImplementationId>) -> Self {
        Self { ids }
    }
}

impl Discovery for ExplicitDiscovery {
    fn discover(&self) -> RegistryResult<Vec<ImplementationId>> {
        debug!(count = self.ids.len(), "explicit discovery");
        Ok(self.ids.clone())
    }
}

/// Discovery that walks a catalog for tagged implementations under a base
/// module.
pub struct ScanDiscovery<'a, T: ?Sized> {
    catalog: &'a Catalog<T>,
    base_module: String,
}

impl<'a, T: ?Sized> ScanDiscovery<'a, T> {
    /// Creates a scanner over `catalog` restricted to `base_module`.
    #[must_use]
    pub fn new(catalog: &'a Catalog<T>, base_module: impl Into<String>) -> Self {
        Self {
            catalog,
            base_module: base_module.into(),
        }
    }
}

impl<T: ?Sized> Discovery for ScanDiscovery<'_, T> {
    fn discover(&self) -> RegistryResult<Vec<ImplementationId>> {
        let ids = self.catalog.scan(&self.base_module);
        debug!(
            base_module = %self.base_module,
            count = ids.len(),
            "scanned catalog for tagged implementations"
        );
        Ok(ids)
    }
}
