//! Key to implementation mapping, built once and queried many times.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use factory_primitives::ImplementationId;
use tracing::{debug, info, warn};

use crate::catalog::TagExtractor;
use crate::descriptor::{Descriptor, instantiate};
use crate::discovery::Discovery;
use crate::error::{RegistryError, RegistryResult};

/// Registry mapping deciding-factor keys to implementations.
///
/// The mapping is populated by [`Registry::build`] and never mutated
/// afterwards, so a built registry can be shared across threads and queried
/// without locking.
pub struct Registry<T: ?Sized> {
    mapping: HashMap<String, Arc<Descriptor<T>>>,
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl<T: ?Sized> Registry<T> {
    /// Builds a registry from identifiers in processing order.
    ///
    /// Every identifier is resolved through `extractor`; each declared key is
    /// mapped to the resulting descriptor. When several implementations
    /// declare the same key the one processed last wins.
    ///
    /// # Errors
    ///
    /// Any extraction failure aborts the build; no partial registry is
    /// returned.
    pub fn build<I, E>(ids: I, extractor: &E) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = ImplementationId>,
        E: TagExtractor<T> + ?Sized,
    {
        let mut mapping: HashMap<String, Arc<Descriptor<T>>> = HashMap::new();
        let mut implementations = 0_usize;

        for id in ids {
            let descriptor = Arc::new(extractor.extract(&id)?);
            implementations += 1;

            for key in descriptor.keys() {
                let previous = mapping.insert(key.clone(), Arc::clone(&descriptor));
                match previous {
                    Some(previous) => warn!(
                        key = %key,
                        replaced = %previous.id(),
                        implementation = %descriptor.id(),
                        "key declared by several implementations; keeping the last"
                    ),
                    None => debug!(key = %key, implementation = %descriptor.id(), "registered key"),
                }
            }
        }

        info!(implementations, keys = mapping.len(), "registry built");
        Ok(Self { mapping })
    }

    /// Runs `discovery` once and builds the registry from its output.
    ///
    /// # Errors
    ///
    /// Propagates discovery failures and any error from [`Registry::build`].
    pub fn discover<D, E>(discovery: &D, extractor: &E) -> RegistryResult<Self>
    where
        D: Discovery + ?Sized,
        E: TagExtractor<T> + ?Sized,
    {
        let ids = discovery.discover()?;
        Self::build(ids, extractor)
    }

    /// Returns a new instance of the implementation registered for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownKey`] if `key` is not registered, or
    /// [`RegistryError::ConstructionFailed`] if the implementation could not
    /// be constructed. Neither leaves any trace in the registry.
    pub fn lookup(&self, key: &str) -> RegistryResult<Box<T>> {
        let descriptor = self
            .mapping
            .get(key)
            .ok_or_else(|| RegistryError::UnknownKey {
                key: key.to_owned(),
            })?;

        debug!(key, implementation = %descriptor.id(), "instantiating");
        instantiate(descriptor).inspect_err(|err| warn!(key, error = %err, "lookup failed"))
    }

    /// Descriptor registered for `key`, if any.
    #[must_use]
    pub fn descriptor(&self, key: &str) -> Option<&Descriptor<T>> {
        self.mapping.get(key).map(AsRef::as_ref)
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.mapping.contains_key(key)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.mapping.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Distinct implementations reachable through at least one key, sorted by
    /// identifier.
    #[must_use]
    pub fn implementations(&self) -> Vec<&Descriptor<T>> {
        let mut seen: Vec<&Arc<Descriptor<T>>> = Vec::new();
        for descriptor in self.mapping.values() {
            if !seen.iter().any(|known| Arc::ptr_eq(known, descriptor)) {
                seen.push(descriptor);
            }
        }
        let mut implementations: Vec<&Descriptor<T>> =
            seen.into_iter().map(AsRef::as_ref).collect();
        implementations.sort_by(|a, b| a.id().cmp(b.id()));
        implementations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, ConstructionError, Constructor, TagExtractor, TypeTag};

    trait Greeter: Send {
        fn greet(&self) -> String;
    }

    struct English;
    struct French;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".into()
        }
    }

    fn english() -> Result<Box<dyn Greeter>, ConstructionError> {
        Ok(Box::new(English))
    }

    fn french() -> Result<Box<dyn Greeter>, ConstructionError> {
        Ok(Box::new(French))
    }

    fn id(path: &str) -> ImplementationId {
        ImplementationId::new(path).unwrap()
    }

    fn catalog() -> Catalog<dyn Greeter> {
        let mut catalog = Catalog::new();
        catalog
            .register(
                id("greet::English"),
                Some(TypeTag::from_static(Some("English"), &["en", "uk"]).unwrap()),
                Constructor::new(english),
            )
            .unwrap();
        catalog
            .register(
                id("greet::French"),
                Some(TypeTag::from_static(Some("French"), &["fr", "uk"]).unwrap()),
                Constructor::new(french),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn build_maps_every_declared_key() {
        let registry =
            Registry::build([id("greet::English"), id("greet::French")], &catalog()).unwrap();
        assert_eq!(registry.keys(), ["en", "fr", "uk"]);
        assert_eq!(registry.lookup("en").unwrap().greet(), "hello");
        assert_eq!(registry.lookup("fr").unwrap().greet(), "bonjour");
    }

    #[test]
    fn last_declaration_of_a_key_wins() {
        let catalog = catalog();

        let registry =
            Registry::build([id("greet::English"), id("greet::French")], &catalog).unwrap();
        assert_eq!(registry.lookup("uk").unwrap().greet(), "bonjour");

        let registry =
            Registry::build([id("greet::French"), id("greet::English")], &catalog).unwrap();
        assert_eq!(registry.lookup("uk").unwrap().greet(), "hello");
    }

    #[test]
    fn unknown_key_fails_without_side_effects() {
        let registry = Registry::build([id("greet::English")], &catalog()).unwrap();
        for _ in 0..2 {
            let err = registry.lookup("de").err().expect("unknown key");
            assert!(matches!(err, RegistryError::UnknownKey { ref key } if key == "de"));
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_discovery_gives_empty_registry() {
        let registry = Registry::<dyn Greeter>::build(Vec::new(), &catalog()).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup("").err(),
            Some(RegistryError::UnknownKey { .. })
        ));
    }

    #[test]
    fn extraction_failure_aborts_build() {
        let err = Registry::build(
            [id("greet::English"), id("greet::Klingon"), id("greet::French")],
            &catalog(),
        )
        .err()
        .expect("build should fail");
        assert!(matches!(err, RegistryError::ResolutionFailed { .. }));
        assert!(err.is_build_error());
    }

    #[test]
    fn discover_runs_backend_once() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let discovery = || -> RegistryResult<Vec<ImplementationId>> {
            calls.set(calls.get() + 1);
            Ok(vec![id("greet::French")])
        };
        let registry = Registry::discover(&discovery, &catalog()).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(registry.contains_key("fr"));
        assert_eq!(registry.descriptor("uk").unwrap().display_name(), "French");
    }

    #[test]
    fn failing_discovery_aborts_before_extraction() {
        use std::cell::Cell;

        let extractions = Cell::new(0);
        let extractor = |id: &ImplementationId| -> RegistryResult<Descriptor<dyn Greeter>> {
            extractions.set(extractions.get() + 1);
            catalog().extract(id)
        };
        let discovery = || -> RegistryResult<Vec<ImplementationId>> {
            Err(RegistryError::discovery("bundle wiring unavailable"))
        };

        let err = Registry::discover(&discovery, &extractor)
            .err()
            .expect("build should fail");
        assert!(matches!(
            err,
            RegistryError::Discovery { ref reason } if reason == "bundle wiring unavailable"
        ));
        assert!(err.is_build_error());
        assert_eq!(extractions.get(), 0);
    }

    #[test]
    fn implementations_are_distinct() {
        let registry =
            Registry::build([id("greet::English"), id("greet::French")], &catalog()).unwrap();
        let names: Vec<_> = registry
            .implementations()
            .into_iter()
            .map(Descriptor::display_name)
            .collect();
        assert_eq!(names, ["English", "French"]);
    }
}
