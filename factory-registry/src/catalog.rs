//! Explicit registration table and the tag extractor over it.

use std::collections::HashMap;
use std::fmt;

use factory_primitives::{ImplementationId, TypeTag};
use tracing::trace;

use crate::descriptor::{Constructor, Descriptor};
use crate::error::{RegistryError, RegistryResult};

/// Resolves an implementation identifier into its declared metadata.
pub trait TagExtractor<T: ?Sized> {
    /// Returns the descriptor for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ResolutionFailed`] when `id` names no known
    /// implementation, or [`RegistryError::MetadataMissing`] when the
    /// implementation carries no capability declaration.
    fn extract(&self, id: &ImplementationId) -> RegistryResult<Descriptor<T>>;
}

impl<T, F> TagExtractor<T> for F
where
    T: ?Sized,
    F: Fn(&ImplementationId) -> RegistryResult<Descriptor<T>>,
{
    fn extract(&self, id: &ImplementationId) -> RegistryResult<Descriptor<T>> {
        (self)(id)
    }
}

enum Declared {
    Tag(TypeTag),
    Nothing,
    Malformed(String),
}

impl Declared {
    fn claims_keys(&self) -> bool {
        !matches!(self, Self::Nothing)
    }
}

struct CatalogEntry<T: ?Sized> {
    id: ImplementationId,
    declared: Declared,
    constructor: Constructor<T>,
}

/// Every implementation known to the process, with or without a
/// capability declaration.
pub struct Catalog<T: ?Sized> {
    entries: Vec<CatalogEntry<T>>,
    index: HashMap<ImplementationId, usize>,
}

impl<T: ?Sized> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.entries.iter().map(|entry| entry.id.as_str()).collect();
        f.debug_struct("Catalog").field("entries", &ids).finish()
    }
}

impl<T: ?Sized> Catalog<T> {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an implementation. `tag` is `None` for implementations that exist
    /// but do not declare any keys.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateImplementation`] if `id` is already
    /// present.
    pub fn register(
        &mut self,
        id: ImplementationId,
        tag: Option<TypeTag>,
        constructor: Constructor<T>,
    ) -> RegistryResult<()> {
        let declared = tag.map_or(Declared::Nothing, Declared::Tag);
        self.insert(id, declared, constructor)
    }

    /// Adds an implementation whose declaration could not be turned into a
    /// [`TypeTag`]. Extracting it reports [`RegistryError::MetadataMissing`]
    /// with `reason`; the rest of the catalog is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateImplementation`] if `id` is already
    /// present.
    pub fn register_malformed(
        &mut self,
        id: ImplementationId,
        reason: impl Into<String>,
        constructor: Constructor<T>,
    ) -> RegistryResult<()> {
        self.insert(id, Declared::Malformed(reason.into()), constructor)
    }

    fn insert(
        &mut self,
        id: ImplementationId,
        declared: Declared,
        constructor: Constructor<T>,
    ) -> RegistryResult<()> {
        if self.index.contains_key(&id) {
            return Err(RegistryError::DuplicateImplementation { id });
        }

        trace!(
            implementation = %id,
            claims_keys = declared.claims_keys(),
            "catalogued implementation"
        );
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(CatalogEntry {
            id,
            declared,
            constructor,
        });
        Ok(())
    }

    /// Builder-style variant of [`Catalog::register`].
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::register`].
    pub fn with(
        mut self,
        id: ImplementationId,
        tag: Option<TypeTag>,
        constructor: Constructor<T>,
    ) -> RegistryResult<Self> {
        self.register(id, tag, constructor)?;
        Ok(self)
    }

    /// Number of catalogued implementations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is catalogued.
    #[must_use]
    pub fn contains(&self, id: &ImplementationId) -> bool {
        self.index.contains_key(id)
    }

    /// Identifiers of implementations that declare keys, in registration
    /// order. Malformed declarations are included so that building from
    /// them fails loudly.
    #[must_use]
    pub fn tagged_ids(&self) -> Vec<ImplementationId> {
        self.entries
            .iter()
            .filter(|entry| entry.declared.claims_keys())
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// Identifiers of implementations declaring keys under module `base`,
    /// sorted by identifier.
    #[must_use]
    pub fn scan(&self, base: &str) -> Vec<ImplementationId> {
        let mut ids: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.declared.claims_keys() && entry.id.is_within(base))
            .map(|entry| entry.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl<T: ?Sized> TagExtractor<T> for Catalog<T> {
    fn extract(&self, id: &ImplementationId) -> RegistryResult<Descriptor<T>> {
        let entry = self
            .index
            .get(id)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| RegistryError::ResolutionFailed { id: id.clone() })?;

        let tag = match &entry.declared {
            Declared::Tag(tag) => tag.clone(),
            Declared::Nothing => {
                return Err(RegistryError::MetadataMissing {
                    id: id.clone(),
                    reason: "implementation does not declare any keys".into(),
                });
            }
            Declared::Malformed(reason) => {
                return Err(RegistryError::MetadataMissing {
                    id: id.clone(),
                    reason: reason.clone(),
                });
            }
        };

        Ok(Descriptor::new(entry.id.clone(), tag, entry.constructor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConstructionError;

    fn unit() -> Result<Box<()>, ConstructionError> {
        Ok(Box::new(()))
    }

    fn id(path: &str) -> ImplementationId {
        ImplementationId::new(path).unwrap()
    }

    fn catalog() -> Catalog<()> {
        Catalog::new()
            .with(
                id("app::kinds::B"),
                Some(TypeTag::from_static(None, &["b"]).unwrap()),
                Constructor::new(unit),
            )
            .and_then(|c| {
                c.with(
                    id("app::kinds::A"),
                    Some(TypeTag::from_static(Some("A"), &["a"]).unwrap()),
                    Constructor::new(unit),
                )
            })
            .and_then(|c| c.with(id("app::kinds::Plain"), None, Constructor::new(unit)))
            .and_then(|c| {
                c.with(
                    id("app::other::C"),
                    Some(TypeTag::from_static(None, &["c"]).unwrap()),
                    Constructor::new(unit),
                )
            })
            .unwrap()
    }

    #[test]
    fn extract_known_tagged_implementation() {
        let descriptor = catalog().extract(&id("app::kinds::A")).unwrap();
        assert_eq!(descriptor.display_name(), "A");
        assert_eq!(descriptor.keys(), ["a"]);
    }

    #[test]
    fn extract_unknown_is_resolution_failure() {
        let err = catalog().extract(&id("app::kinds::Ghost")).expect_err("unknown");
        assert!(matches!(err, RegistryError::ResolutionFailed { id: missing } if missing.as_str() == "app::kinds::Ghost"));
    }

    #[test]
    fn extract_untagged_is_metadata_missing() {
        let err = catalog().extract(&id("app::kinds::Plain")).expect_err("untagged");
        assert!(matches!(err, RegistryError::MetadataMissing { .. }));
    }

    #[test]
    fn scan_filters_by_module_and_sorts() {
        let catalog = catalog();
        assert_eq!(catalog.scan("app::kinds"), vec![id("app::kinds::A"), id("app::kinds::B")]);
        assert_eq!(catalog.scan("app"), vec![
            id("app::kinds::A"),
            id("app::kinds::B"),
            id("app::other::C"),
        ]);
        assert!(catalog.scan("nothing").is_empty());
    }

    #[test]
    fn tagged_ids_keep_registration_order() {
        assert_eq!(catalog().tagged_ids(), vec![
            id("app::kinds::B"),
            id("app::kinds::A"),
            id("app::other::C"),
        ]);
    }

    #[test]
    fn malformed_declaration_only_affects_its_own_entry() {
        let mut catalog = catalog();
        catalog
            .register_malformed(
                id("app::kinds::Odd"),
                "invalid type tag: name cannot be empty",
                Constructor::new(unit),
            )
            .unwrap();

        let err = catalog.extract(&id("app::kinds::Odd")).expect_err("malformed");
        assert!(matches!(
            err,
            RegistryError::MetadataMissing { ref reason, .. } if reason.contains("name cannot be empty")
        ));
        assert!(catalog.scan("app::kinds").contains(&id("app::kinds::Odd")));
        assert!(catalog.extract(&id("app::kinds::A")).is_ok());
        assert!(catalog.scan("app::other").iter().all(|found| found != &id("app::kinds::Odd")));
    }

    #[test]
    fn duplicate_registration_errors() {
        let err = catalog()
            .with(id("app::kinds::A"), None, Constructor::new(unit))
            .expect_err("duplicate");
        assert!(matches!(err, RegistryError::DuplicateImplementation { .. }));
    }
}
