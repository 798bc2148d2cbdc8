//! TOML configuration for the access layer.
//!
//! ```toml
//! [db]
//! max_page_size = 500
//! debug = false
//! ```

use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;
use widedb_core::config::DbConfig;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: max_page_size must be at least 1")]
    ZeroMaxPageSize,
}

///
/// Config
///
/// Root of the config file. Every table is optional; unknown keys are
/// rejected so typos surface at load time.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub db: DbConfig,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        if config.db.max_page_size == 0 {
            return Err(ConfigError::ZeroMaxPageSize);
        }

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}

///
/// TESTS
///
