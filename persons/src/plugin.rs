//! Link-time plugin slot for person implementations.
//!
//! `#[person_type]` submits one [`PersonPlugin`] per annotated struct via
//! `inventory::submit!`; [`catalog`] collects every submission into a
//! [`Catalog`] that discovery and tag extraction run against.

use factory_primitives::{ImplementationId, TypeTag};
use factory_registry::{Catalog, ConstructionError, Constructor, RegistryResult};
use tracing::{debug, warn};

use crate::Person;

/// Capability declaration carried by a plugin.
#[derive(Debug)]
pub struct Declaration {
    /// Display name, `None` when not given.
    pub name: Option<&'static str>,
    /// Deciding-factor keys.
    pub keys: &'static [&'static str],
}

/// One registered person implementation.
pub struct PersonPlugin {
    /// Fully qualified type path.
    pub type_path: &'static str,
    /// Declaration, `None` for implementations that declare no keys.
    pub declaration: Option<Declaration>,
    /// Zero-argument constructor.
    pub constructor: fn() -> Result<Box<dyn Person>, ConstructionError>,
}

inventory::collect!(PersonPlugin);

/// Collects every registered plugin into a catalog.
///
/// # Errors
///
/// Returns [`factory_registry::RegistryError::Primitive`] for a malformed type path or
/// [`factory_registry::RegistryError::DuplicateImplementation`] if two plugins share a path.
/// A declaration that is not a valid tag is catalogued as malformed and only
/// fails when that implementation is resolved.
pub fn catalog() -> RegistryResult<Catalog<dyn Person>> {
    let mut catalog = Catalog::new();
    for plugin in inventory::iter::<PersonPlugin> {
        let id = ImplementationId::new(plugin.type_path)?;
        let constructor = Constructor::new(plugin.constructor);
        match &plugin.declaration {
            Some(declaration) => match TypeTag::from_static(declaration.name, declaration.keys) {
                Ok(tag) => catalog.register(id, Some(tag), constructor)?,
                Err(err) => {
                    warn!(implementation = %id, error = %err, "malformed person declaration");
                    catalog.register_malformed(id, err.to_string(), constructor)?;
                }
            },
            None => catalog.register(id, None, constructor)?,
        }
    }
    debug!(implementations = catalog.len(), "collected person plugins");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use factory_registry::{RegistryError, TagExtractor};

    use super::*;

    #[test]
    fn builtin_plugins_are_catalogued() {
        let catalog = catalog().unwrap();
        let male = ImplementationId::new("persons::builtin::Male").unwrap();
        assert!(catalog.contains(&male));

        let descriptor = catalog.extract(&male).unwrap();
        assert_eq!(descriptor.display_name(), "Male");
        assert_eq!(descriptor.keys(), ["male", "m"]);
    }

    #[derive(Debug)]
    struct Nameless;

    impl Person for Nameless {
        fn kind(&self) -> &'static str {
            "nameless"
        }

        fn instance_id(&self) -> factory_primitives::InstanceId {
            factory_primitives::InstanceId::random()
        }
    }

    fn nameless() -> Result<Box<dyn Person>, ConstructionError> {
        Ok(Box::new(Nameless))
    }

    inventory::submit! {
        PersonPlugin {
            type_path: concat!(module_path!(), "::Nameless"),
            declaration: Some(Declaration {
                name: Some(" "),
                keys: &["nameless"],
            }),
            constructor: nameless,
        }
    }

    #[test]
    fn malformed_declaration_does_not_break_other_builds() {
        let catalog = catalog().unwrap();
        let nameless = ImplementationId::new("persons::plugin::tests::Nameless").unwrap();
        let err = catalog.extract(&nameless).expect_err("blank name");
        assert!(matches!(err, RegistryError::MetadataMissing { .. }));

        let factory = crate::PersonFactory::with_defaults().unwrap();
        assert_eq!(factory.person_for("f").unwrap().kind(), "female");
    }

    #[test]
    fn builtin_scan_is_sorted() {
        let ids = catalog().unwrap().scan("persons::builtin");
        let names: Vec<_> = ids.iter().map(ImplementationId::type_name).collect();
        assert_eq!(names, ["Female", "Male"]);
    }
}
