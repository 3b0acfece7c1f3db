//! Configuration loader: defaults, optional JSON file, environment.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use factory_primitives::ImplementationId;
use tracing::{debug, info};

use crate::schema::{DiscoveryStrategy, FactoryConfig};

/// Selects the discovery backend: `scan` or `explicit`.
pub const ENV_DISCOVERY: &str = "PERSON_FACTORY_DISCOVERY";
/// Overrides the base module scanned for implementations.
pub const ENV_BASE_MODULE: &str = "PERSON_FACTORY_BASE_MODULE";
/// Comma separated identifiers for explicit discovery.
pub const ENV_IMPLEMENTATIONS: &str = "PERSON_FACTORY_IMPLEMENTATIONS";

/// Loads configuration from `path` (if any) and the process environment.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, an environment variable
/// holds an invalid value, or the merged configuration does not validate.
pub fn load(path: Option<&Path>) -> Result<FactoryConfig> {
    let config = match path {
        Some(path) => FactoryConfig::from_path(path)?,
        None => FactoryConfig::default(),
    };
    let config = config.with_overrides(|name| std::env::var(name).ok())?;
    config.validate()?;
    info!(
        discovery = config.discovery.label(),
        base_module = %config.base_module,
        "factory configuration loaded"
    );
    Ok(config)
}

impl FactoryConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading factory config {}", path.display()))?;
        debug!(path = %path.display(), "parsing factory config");
        Self::from_json_str(&raw)
            .with_context(|| format!("parsing factory config {}", path.display()))
    }

    /// Applies `PERSON_FACTORY_*` overrides read through `lookup`.
    ///
    /// Setting only the implementations list switches to explicit discovery.
    /// A blank value counts as unset.
    ///
    /// # Errors
    ///
    /// Fails on an unknown strategy name or an invalid identifier.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_module) = lookup(ENV_BASE_MODULE) {
            self.base_module = base_module;
        }

        let implementations = lookup(ENV_IMPLEMENTATIONS)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_implementations(&raw))
            .transpose()?;

        match lookup(ENV_DISCOVERY).as_deref().map(str::trim) {
            Some("scan") => self.discovery = DiscoveryStrategy::Scan,
            Some("explicit") | None if implementations.is_some() => {
                self.discovery = DiscoveryStrategy::Explicit {
                    implementations: implementations.unwrap_or_default(),
                };
            }
            Some("explicit") => {
                if !matches!(self.discovery, DiscoveryStrategy::Explicit { .. }) {
                    self.discovery = DiscoveryStrategy::Explicit {
                        implementations: Vec::new(),
                    };
                }
            }
            Some(other) => bail!("{ENV_DISCOVERY} must be `scan` or `explicit`, got `{other}`"),
            None => {}
        }

        Ok(self)
    }
}

fn parse_implementations(raw: &str) -> Result<Vec<ImplementationId>> {
    let implementations = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            ImplementationId::new(entry)
                .with_context(|| format!("invalid entry in {ENV_IMPLEMENTATIONS}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if implementations.is_empty() {
        bail!("{ENV_IMPLEMENTATIONS} is set but names no implementations");
    }
    Ok(implementations)
}
