//! Backup Suffix Value Object
//!
//! Backups live next to the file they protect, named by appending a
//! reserved suffix to the file name. The suffix is validated once so that
//! deriving a backup path can never fail later.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error when a backup suffix is unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixError {
    /// Suffix is empty or just "."
    Empty,
    /// Suffix must start with '.'
    MissingDot(String),
    /// Suffix contains a path separator
    ContainsSeparator(String),
}

impl fmt::Display for SuffixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixError::Empty => write!(f, "backup suffix is empty"),
            SuffixError::MissingDot(s) => {
                write!(f, "backup suffix '{}' must start with '.'", s)
            }
            SuffixError::ContainsSeparator(s) => {
                write!(f, "backup suffix '{}' must not contain path separators", s)
            }
        }
    }
}

impl std::error::Error for SuffixError {}

/// A validated backup suffix such as `.bak`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupSuffix(String);

impl BackupSuffix {
    pub const DEFAULT: &'static str = ".bak";

    pub fn new(suffix: impl Into<String>) -> Result<Self, SuffixError> {
        let suffix = suffix.into();
        if suffix.is_empty() || suffix == "." {
            return Err(SuffixError::Empty);
        }
        if !suffix.starts_with('.') {
            return Err(SuffixError::MissingDot(suffix));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(SuffixError::ContainsSeparator(suffix));
        }
        Ok(Self(suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backup location for `target`: the same path with the suffix appended
    pub fn backup_path(&self, target: &Path) -> PathBuf {
        let mut name: OsString = target.as_os_str().to_owned();
        name.push(&self.0);
        PathBuf::from(name)
    }

    /// Whether `path` names a file in the reserved backup namespace
    pub fn is_reserved(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.0))
            .unwrap_or(false)
    }
}

impl Default for BackupSuffix {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for BackupSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
