//! Identifier types.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

const PATH_SEPARATOR: &str = "::";

/// Fully qualified path naming one discoverable implementation,
/// e.g. `persons::builtin::Female`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImplementationId(String);

impl ImplementationId {
    /// Creates an implementation identifier after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImplementationId`] if the identifier is empty,
    /// contains whitespace, or has an empty path segment.
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        validate_path(&id)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module path that owns the implementation (everything before the last
    /// `::` segment). Empty for a bare type name.
    #[must_use]
    pub fn module(&self) -> &str {
        self.0
            .rsplit_once(PATH_SEPARATOR)
            .map_or("", |(module, _)| module)
    }

    /// Trailing type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0
            .rsplit_once(PATH_SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Whether the implementation lives in `base` or one of its submodules.
    #[must_use]
    pub fn is_within(&self, base: &str) -> bool {
        let module = self.module();
        module == base
            || module
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
    }
}

fn validate_path(id: &str) -> crate::Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidImplementationId {
            id: String::new(),
            reason: "identifier cannot be empty".into(),
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(Error::InvalidImplementationId {
            id: id.into(),
            reason: "identifier cannot contain whitespace".into(),
        });
    }

    if id.split(PATH_SEPARATOR).any(str::is_empty) {
        return Err(Error::InvalidImplementationId {
            id: id.into(),
            reason: "identifier has an empty path segment".into(),
        });
    }

    Ok(())
}

impl Display for ImplementationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for ImplementationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ImplementationId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImplementationId> for String {
    fn from(value: ImplementationId) -> Self {
        value.0
    }
}

/// Unique identity stamped on every constructed instance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generates a random instance identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
