//! Type tags: the display name and deciding-factor keys an implementation
//! declares for itself.

use crate::error::{Error, Result};

/// Display name used when a declaration does not provide one.
pub const UNASSIGNED_NAME: &str = "[unassigned]";

/// Declared metadata of one implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeTag {
    name: String,
    keys: Vec<String>,
}

impl TypeTag {
    /// Starts building a type tag.
    #[must_use]
    pub fn builder() -> TypeTagBuilder {
        TypeTagBuilder {
            name: None,
            keys: Vec::new(),
        }
    }

    /// Shorthand for a tag built from static declaration data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] under the same rules as
    /// [`TypeTagBuilder::build`].
    pub fn from_static(name: Option<&str>, keys: &[&str]) -> Result<Self> {
        let builder = Self::builder().keys(keys.iter().copied())?;
        match name {
            Some(name) => builder.name(name)?.build(),
            None => builder.build(),
        }
    }

    /// Human-friendly name of the implementation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys the implementation answers to, in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Builder for [`TypeTag`].
pub struct TypeTagBuilder {
    name: Option<String>,
    keys: Vec<String>,
}

impl TypeTagBuilder {
    /// Sets the display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if the name is blank.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidTag {
                reason: "name cannot be empty".into(),
            });
        }
        self.name = Some(name);
        Ok(self)
    }

    /// Appends a deciding-factor key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if the key is empty or was already
    /// declared.
    pub fn key(mut self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidTag {
                reason: "key cannot be empty".into(),
            });
        }
        if self.keys.contains(&key) {
            return Err(Error::InvalidTag {
                reason: format!("key `{key}` declared more than once"),
            });
        }
        self.keys.push(key);
        Ok(self)
    }

    /// Appends several keys in order.
    ///
    /// # Errors
    ///
    /// Fails on the first key rejected by [`TypeTagBuilder::key`].
    pub fn keys<I, S>(self, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys
            .into_iter()
            .try_fold(self, |builder, key| builder.key(key))
    }

    /// Finalises the tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if no key was declared.
    pub fn build(self) -> Result<TypeTag> {
        if self.keys.is_empty() {
            return Err(Error::InvalidTag {
                reason: "at least one key must be declared".into(),
            });
        }

        Ok(TypeTag {
            name: self.name.unwrap_or_else(|| UNASSIGNED_NAME.to_owned()),
            keys: self.keys,
        })
    }
}
