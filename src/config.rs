//! Data directory configuration, optionally read from a TOML file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where the raw and cleaned CSV files live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub raw_dir: PathBuf,
    pub cleaned_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            cleaned_dir: PathBuf::from("data/cleaned"),
        }
    }
}

impl DataPaths {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
