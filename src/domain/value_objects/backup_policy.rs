//! Backup Policy Value Object
//!
//! Decides what apply does when the backup path for a target already
//! exists. That happens when apply runs twice without an undo in between,
//! or when the project simply has a file with that name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to do when a backup file is already present
///
/// - `Keep`: reuse the backup if an earlier manifest recorded it, otherwise
///   refuse like `Fail` (default)
/// - `Refresh`: overwrite whatever is there with the current file
/// - `Fail`: skip the item and report an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupPolicy {
    #[default]
    Keep,
    Refresh,
    Fail,
}

impl BackupPolicy {
    /// Accepted spellings, for help text and typo suggestions
    pub const VALUES: &'static [&'static str] = &["keep", "refresh", "fail"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackupPolicy::Keep => "keep",
            BackupPolicy::Refresh => "refresh",
            BackupPolicy::Fail => "fail",
        }
    }

    /// Lenient parse used for environment variables
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "keep" | "skip" => Some(BackupPolicy::Keep),
            "refresh" | "overwrite" => Some(BackupPolicy::Refresh),
            "fail" | "error" => Some(BackupPolicy::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for BackupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "invalid backup policy '{}' (expected one of: {})",
                s,
                Self::VALUES.join(", ")
            )
        })
    }
}
