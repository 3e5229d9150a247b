//! Apply options

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::domain::value_objects::{BackupPolicy, BackupSuffix};

/// Options for an apply run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Suffix appended to backup file names
    pub suffix: BackupSuffix,
    /// What to do when a backup already exists
    pub policy: BackupPolicy,
    /// Compare original and backup hashes before overwriting
    pub verify: bool,
    /// Backups recorded by an earlier manifest; only these may be reused
    pub known_backups: BTreeSet<PathBuf>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            suffix: BackupSuffix::default(),
            policy: BackupPolicy::default(),
            verify: true,
            known_backups: BTreeSet::new(),
        }
    }
}

impl ApplyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the `[backup]` section of a config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            suffix: config.backup_suffix()?,
            policy: config.backup.policy,
            verify: config.backup.verify,
            known_backups: BTreeSet::new(),
        })
    }

    pub fn with_suffix(mut self, suffix: BackupSuffix) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_policy(mut self, policy: BackupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_known_backups<I>(mut self, backups: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.known_backups.extend(backups);
        self
    }

    /// An existing file at `backup` was written by an earlier run
    pub fn owns_backup(&self, backup: &Path) -> bool {
        self.known_backups.contains(backup)
    }
}
