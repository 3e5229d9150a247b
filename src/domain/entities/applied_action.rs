//! AppliedAction entity - the outcome of deploying one item
//!
//! An action is only ever recorded for a successful write. The two
//! constructors are the only way to build one, so "created" and "has a
//! backup" are mutually exclusive by construction.

use std::path::{Path, PathBuf};

/// Record of one successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAction {
    target_path: PathBuf,
    backup_path: Option<PathBuf>,
}

impl AppliedAction {
    /// Nothing existed at `target_path` before the write
    pub fn created(target_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            backup_path: None,
        }
    }

    /// A prior file was copied to `backup_path` and then overwritten
    pub fn replaced(target_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            backup_path: Some(backup_path.into()),
        }
    }

    /// Absolute path that was written
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn created_new(&self) -> bool {
        self.backup_path.is_none()
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_action_has_no_backup() {
        let action = AppliedAction::created("/root/a/b.txt");
        assert!(action.created_new());
        assert_eq!(action.backup_path(), None);
    }

    #[test]
    fn replaced_action_is_not_created() {
        let action = AppliedAction::replaced("/root/a/b.txt", "/root/a/b.txt.bak");
        assert!(!action.created_new());
        assert_eq!(action.backup_path(), Some(Path::new("/root/a/b.txt.bak")));
        assert_eq!(action.target_path(), Path::new("/root/a/b.txt"));
    }
}
