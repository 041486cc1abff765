//! Configuration system
//!
//! Pool setups are plain data and can live in TOML or RON files alongside
//! other game configuration. A [`PoolSetupConfig`] names templates by their
//! registered name; [`PoolSetupConfig::resolve`] turns it into the handle-based
//! [`PoolSpec`]s the queue pool manager consumes.

pub use serde::{Deserialize, Serialize};

use crate::pool::{PoolError, PoolSpec};
use crate::world::InstanceWorld;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// One pool entry in a setup file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Tag the pool is served under
    pub tag: String,

    /// Registered name of the template to construct from
    pub template: String,

    /// Fixed pool capacity
    pub size: usize,
}

/// File-loadable description of a queue pool setup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolSetupConfig {
    /// Pools to configure
    pub pools: Vec<PoolEntry>,
}

impl Config for PoolSetupConfig {}

impl PoolSetupConfig {
    /// Resolve template names against the world, producing pool specs
    ///
    /// Fails fast on the first entry naming a template the world has not
    /// registered.
    pub fn resolve(&self, world: &InstanceWorld) -> Result<Vec<PoolSpec>, PoolError> {
        self.pools
            .iter()
            .map(|entry| {
                let template = world
                    .find_template(&entry.template)
                    .ok_or_else(|| PoolError::UnknownTemplateName(entry.template.clone()))?;
                Ok(PoolSpec::new(entry.tag.clone(), template, entry.size))
            })
            .collect()
    }
}
