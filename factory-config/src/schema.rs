//! Strongly typed configuration schema.

use anyhow::{Result, bail};
use factory_primitives::ImplementationId;
use serde::{Deserialize, Serialize};

/// Module scanned for built-in implementations when nothing else is set.
pub const DEFAULT_BASE_MODULE: &str = "persons::builtin";

/// How the factory enumerates implementations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// Scan link-time registered implementations under the base module.
    #[default]
    Scan,
    /// Use exactly these identifiers, in this order.
    Explicit {
        /// Ordered implementation identifiers.
        implementations: Vec<ImplementationId>,
    },
}

impl DiscoveryStrategy {
    /// Short label used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Explicit { .. } => "explicit",
        }
    }
}

/// Factory configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Discovery backend.
    pub discovery: DiscoveryStrategy,
    /// Module under which scanning looks for implementations.
    pub base_module: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryStrategy::Scan,
            base_module: DEFAULT_BASE_MODULE.to_owned(),
        }
    }
}

impl FactoryConfig {
    /// Configuration using explicit discovery over `implementations`.
    #[must_use]
    pub fn explicit(implementations: Vec<ImplementationId>) -> Self {
        Self {
            discovery: DiscoveryStrategy::Explicit { implementations },
            ..Self::default()
        }
    }

    /// Sets the base module.
    #[must_use]
    pub fn with_base_module(mut self, base_module: impl Into<String>) -> Self {
        self.base_module = base_module.into();
        self
    }

    /// Parses configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, unknown fields, or invalid identifiers.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the configuration for values no backend can work with.
    ///
    /// # Errors
    ///
    /// Fails when the base module is blank or an explicit strategy lists no
    /// implementations.
    pub fn validate(&self) -> Result<()> {
        if self.base_module.trim().is_empty() {
            bail!("base_module cannot be empty");
        }
        if let DiscoveryStrategy::Explicit { implementations } = &self.discovery {
            if implementations.is_empty() {
                bail!("explicit discovery requires at least one implementation");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scan_builtin_module() {
        let config = FactoryConfig::default();
        assert_eq!(config.discovery, DiscoveryStrategy::Scan);
        assert_eq!(config.base_module, DEFAULT_BASE_MODULE);
        config.validate().unwrap();
    }

    #[test]
    fn parses_explicit_strategy() {
        let config = FactoryConfig::from_json_str(
            r#"{
                "discovery": {
                    "strategy": "explicit",
                    "implementations": ["persons::builtin::Male", "persons::builtin::Female"]
                }
            }"#,
        )
        .unwrap();

        let DiscoveryStrategy::Explicit { implementations } = &config.discovery else {
            panic!("expected explicit strategy");
        };
        assert_eq!(implementations.len(), 2);
        assert_eq!(implementations[1].type_name(), "Female");
        assert_eq!(config.base_module, DEFAULT_BASE_MODULE);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_ids() {
        assert!(FactoryConfig::from_json_str(r#"{ "base_package": "x" }"#).is_err());
        assert!(
            FactoryConfig::from_json_str(
                r#"{ "discovery": { "strategy": "explicit", "implementations": ["bad id"] } }"#
            )
            .is_err()
        );
    }

    #[test]
    fn validate_rejects_empty_values() {
        let err = FactoryConfig::default()
            .with_base_module(" ")
            .validate()
            .expect_err("blank module");
        assert!(err.to_string().contains("base_module"));

        let err = FactoryConfig::explicit(Vec::new())
            .validate()
            .expect_err("no implementations");
        assert!(err.to_string().contains("at least one"));
    }
}
