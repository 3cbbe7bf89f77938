//! ComposerConfig - Caller-Supplied Settings
//!
//! Settings that can live outside code: the composer's name (used in spans
//! and schematics) and the continuation field name. Functions (units,
//! aggregator, mapper) are always supplied in code through [`Composer`].
//!
//! [`Composer`]: crate::chain::Composer

use crate::field::FieldName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_NAME: &str = "CASCADE_NAME";
pub const ENV_CONTINUATION_FIELD: &str = "CASCADE_CONTINUATION_FIELD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub name: String,
    pub continuation_field: FieldName,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            name: "composer".to_string(),
            continuation_field: FieldName::default(),
        }
    }
}

impl ComposerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Read overrides from `CASCADE_NAME` and `CASCADE_CONTINUATION_FIELD`.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(name) = lookup(ENV_NAME) {
            config.name = name;
        }
        if let Some(field) = lookup(ENV_CONTINUATION_FIELD) {
            config.continuation_field = FieldName::from(field);
        }
        config.validate()
    }

    /// Trim the field name so every loader normalises it the same way, then
    /// reject a blank one.
    fn validate(mut self) -> Result<Self, ConfigError> {
        self.continuation_field = FieldName::from(self.continuation_field.as_str().trim());
        if self.continuation_field.as_str().is_empty() {
            return Err(ConfigError::Invalid(
                "continuation_field must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}
