//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{BackupPolicy, BackupSuffix, SuffixError};

use super::loader::{self, ConfigWarning};

/// Default rollback manifest file name, relative to the working directory
pub const DEFAULT_MANIFEST_FILE: &str = "safedeploy-rollback.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid backup suffix: {0}")]
    InvalidSuffix(#[from] SuffixError),
}

/// Backup behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Reserved suffix appended to backed-up file names
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// What to do when a backup already exists
    #[serde(default)]
    pub policy: BackupPolicy,

    /// Compare SHA-256 of original and backup before overwriting
    #[serde(default = "default_true")]
    pub verify: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            policy: BackupPolicy::default(),
            verify: true,
        }
    }
}

/// Rollback manifest location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

fn default_suffix() -> String {
    BackupSuffix::DEFAULT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_FILE)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backup: BackupConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Validated backup suffix
    pub fn backup_suffix(&self) -> Result<BackupSuffix, ConfigError> {
        Ok(BackupSuffix::new(self.backup.suffix.clone())?)
    }
}
