//! RollbackManifest entity - everything undo needs, and nothing else
//!
//! The manifest is a pure data structure. Loading and saving are handled by
//! `ManifestRepository`, so the same value can be produced by one process and
//! consumed, unmodified, by another one much later.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::AppliedAction;

/// Current manifest format version
pub const MANIFEST_VERSION: u32 = 1;

/// Durable record of how to reverse one apply run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackManifest {
    version: u32,
    root: PathBuf,
    created_at: DateTime<Utc>,
    /// Files that did not exist before apply, in apply order
    files_to_remove: Vec<PathBuf>,
    /// Original path -> backup path
    backups_to_restore: BTreeMap<PathBuf, PathBuf>,
    /// Directories apply had to create, shallowest first
    dirs_created: Vec<PathBuf>,
}

impl RollbackManifest {
    /// Create an empty manifest for `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            root: root.into(),
            created_at: Utc::now(),
            files_to_remove: Vec::new(),
            backups_to_restore: BTreeMap::new(),
            dirs_created: Vec::new(),
        }
    }

    /// Partition applied actions into the two rollback collections
    ///
    /// Every action lands in exactly one collection: created files go to
    /// `files_to_remove`, replaced files go to `backups_to_restore`.
    pub fn from_actions(root: impl Into<PathBuf>, actions: &[AppliedAction]) -> Self {
        let mut manifest = Self::new(root);
        for action in actions {
            manifest.record(action);
        }
        manifest
    }

    /// Add one action to the manifest
    pub fn record(&mut self, action: &AppliedAction) {
        match action.backup_path() {
            Some(backup) => {
                self.backups_to_restore
                    .insert(action.target_path().to_path_buf(), backup.to_path_buf());
            }
            None => self.files_to_remove.push(action.target_path().to_path_buf()),
        }
    }

    pub fn with_dirs_created(mut self, dirs: Vec<PathBuf>) -> Self {
        self.dirs_created = dirs;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Used by repositories when rebuilding a manifest from storage
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_file_to_remove(mut self, path: impl Into<PathBuf>) -> Self {
        self.files_to_remove.push(path.into());
        self
    }

    pub fn with_backup(mut self, original: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        self.backups_to_restore.insert(original.into(), backup.into());
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Absolute deployment root the manifest was produced for
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn files_to_remove(&self) -> &[PathBuf] {
        &self.files_to_remove
    }

    pub fn backups_to_restore(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.backups_to_restore
            .iter()
            .map(|(original, backup)| (original.as_path(), backup.as_path()))
    }

    /// Backup path recorded for `original`, if any
    pub fn backup_for(&self, original: &Path) -> Option<&Path> {
        self.backups_to_restore.get(original).map(PathBuf::as_path)
    }

    pub fn dirs_created(&self) -> &[PathBuf] {
        &self.dirs_created
    }

    /// Number of file entries (removals + restores)
    pub fn len(&self) -> usize {
        self.files_to_remove.len() + self.backups_to_restore.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.dirs_created.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_manifest_is_empty() {
        let manifest = RollbackManifest::new("/srv/site");
        assert!(manifest.is_empty());
        assert_eq!(manifest.version(), MANIFEST_VERSION);
        assert_eq!(manifest.root(), Path::new("/srv/site"));
    }

    #[test]
    fn from_actions_partitions_without_loss() {
        let actions = vec![
            AppliedAction::created("/srv/site/a/b.txt"),
            AppliedAction::replaced("/srv/site/index.html", "/srv/site/index.html.bak"),
            AppliedAction::created("/srv/site/a/c.txt"),
        ];

        let manifest = RollbackManifest::from_actions("/srv/site", &actions);

        assert_eq!(manifest.len(), actions.len());
        assert_eq!(
            manifest.files_to_remove(),
            &[
                PathBuf::from("/srv/site/a/b.txt"),
                PathBuf::from("/srv/site/a/c.txt")
            ]
        );
        assert_eq!(
            manifest.backup_for(Path::new("/srv/site/index.html")),
            Some(Path::new("/srv/site/index.html.bak"))
        );
    }

    #[test]
    fn files_to_remove_keep_apply_order() {
        let actions = vec![
            AppliedAction::created("/r/z.txt"),
            AppliedAction::created("/r/a.txt"),
        ];
        let manifest = RollbackManifest::from_actions("/r", &actions);
        assert_eq!(
            manifest.files_to_remove(),
            &[PathBuf::from("/r/z.txt"), PathBuf::from("/r/a.txt")]
        );
    }

    #[test]
    fn equality_is_structural() {
        let at = Utc::now();
        let a = RollbackManifest::new("/r")
            .with_created_at(at)
            .with_file_to_remove("/r/x")
            .with_backup("/r/y", "/r/y.bak");
        let b = RollbackManifest::new("/r")
            .with_created_at(at)
            .with_file_to_remove("/r/x")
            .with_backup("/r/y", "/r/y.bak");
        assert_eq!(a, b);

        let c = b.clone().with_file_to_remove("/r/z");
        assert_ne!(a, c);
    }

    #[test]
    fn dirs_only_manifest_is_not_empty() {
        let manifest =
            RollbackManifest::new("/r").with_dirs_created(vec![PathBuf::from("/r/a")]);
        assert_eq!(manifest.len(), 0);
        assert!(!manifest.is_empty());
    }
}
