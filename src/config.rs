//! Tagger configuration
//!
//! Stored as JSON. Every key is optional; missing keys take defaults.
//!
//! Lookup order:
//! 1. explicit path (`--config`)
//! 2. `<config_dir>/coverstamp/config.json`, if it exists
//! 3. built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::batch::{BatchOptions, FailurePolicy};
use crate::core::tags::MAX_TAG_SIZE;
use crate::core::types::{TagVersion, WriteOptions};

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "coverstamp";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    pub id3_version: TagVersion,
    pub padding: usize,
    pub cover_description: String,
    pub output_dir: PathBuf,
    pub failure_policy: FailurePolicy,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        let write = WriteOptions::default();
        Self {
            id3_version: write.version,
            padding: write.padding,
            cover_description: write.cover_description,
            output_dir: PathBuf::from("tagged"),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl TaggerConfig {
    /// Where the config lives when no path is given.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location, or fall back to defaults.
    ///
    /// An explicit path must exist; the default location may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.padding > MAX_TAG_SIZE {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "padding {} exceeds the ID3v2 tag limit of {MAX_TAG_SIZE} bytes",
                    config.padding
                ),
            });
        }

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Non-UTF-8 paths cannot be represented in JSON.
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, json).map_err(write_err)?;

        log::info!("saved config to {}", path.display());
        Ok(())
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            version: self.id3_version,
            padding: self.padding,
            cover_description: self.cover_description.clone(),
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            write: self.write_options(),
            policy: self.failure_policy,
        }
    }
}
