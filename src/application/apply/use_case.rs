//! Apply Use Case
//!
//! Per item: validate the path, create missing parent directories, copy any
//! existing file aside, then write the new content. An existing file is
//! never written unless its backup is in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::{AppliedAction, DeploymentItem};
use crate::domain::ports::{DeployEvent, DeployEventSink, FileSystem, FsError, NoopEventSink};
use crate::domain::value_objects::{BackupPolicy, PathError, SafePath};
use crate::error::DeployError;

use super::options::ApplyOptions;
use super::result::{ApplyPreview, ApplyResult, ItemFailure, PlannedItem};

/// Apply use case - deploys items and records what it did
pub struct ApplyUseCase<FS>
where
    FS: FileSystem,
{
    fs: FS,
    options: ApplyOptions,
}

impl<FS> ApplyUseCase<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS, options: ApplyOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &ApplyOptions {
        &self.options
    }

    /// Apply items under `root` without progress reporting
    pub fn execute(&self, items: &[DeploymentItem], root: &Path) -> ApplyResult {
        self.execute_with_events(items, root, &NoopEventSink)
    }

    /// Apply items under `root`, reporting progress to `event_sink`
    ///
    /// Items are processed in order. A failing item is recorded in
    /// `ApplyResult::errors` and the run continues with the next one.
    pub fn execute_with_events(
        &self,
        items: &[DeploymentItem],
        root: &Path,
        event_sink: &dyn DeployEventSink,
    ) -> ApplyResult {
        let mut result = ApplyResult::new(root);
        let mut seen: HashMap<SafePath, usize> = HashMap::new();
        let detailed = event_sink.wants_detailed_events();

        tracing::info!(root = %root.display(), items = items.len(), "apply started");
        event_sink.on_event(DeployEvent::ApplyStarted {
            root: root.to_path_buf(),
            item_count: items.len(),
        });

        for (index, item) in items.iter().enumerate() {
            match self.apply_item(index, item, root, &mut seen, &mut result, event_sink) {
                Ok(action) => {
                    tracing::debug!(
                        index,
                        path = %action.target_path().display(),
                        created = action.created_new(),
                        "item applied"
                    );
                    if detailed {
                        event_sink.on_event(DeployEvent::Written {
                            index,
                            path: action.target_path().to_path_buf(),
                            created: action.created_new(),
                        });
                    }
                    result.add_action(action);
                }
                Err(error) => {
                    tracing::warn!(index, kind = error.kind(), "{}", error);
                    event_sink.on_event(DeployEvent::ItemFailed {
                        index,
                        path: error.path().clone(),
                        error: error.to_string(),
                    });
                    result.add_error(index, error);
                }
            }
        }

        tracing::info!(
            created = result.created_count(),
            replaced = result.replaced_count(),
            errors = result.errors.len(),
            "apply finished"
        );
        event_sink.on_event(DeployEvent::ApplyCompleted {
            created_count: result.created_count(),
            replaced_count: result.replaced_count(),
            error_count: result.errors.len(),
        });

        result
    }

    /// Report what `execute` would do, without touching the filesystem
    pub fn preview(&self, items: &[DeploymentItem], root: &Path) -> ApplyPreview {
        let mut preview = ApplyPreview::default();
        let mut seen: HashMap<SafePath, usize> = HashMap::new();

        for (index, item) in items.iter().enumerate() {
            let safe = match self.validate(index, item, &mut seen) {
                Ok(safe) => safe,
                Err(error) => {
                    preview.errors.push(ItemFailure { index, error });
                    continue;
                }
            };
            let target = safe.resolve(root);

            for dir in self.missing_parents(root, &safe) {
                if !preview.dirs_to_create.contains(&dir) {
                    preview.dirs_to_create.push(dir);
                }
            }

            if !self.fs.exists(&target) {
                preview.planned.push(PlannedItem {
                    index,
                    target,
                    backup: None,
                    reuses_backup: false,
                });
                continue;
            }

            let backup = self.options.suffix.backup_path(&target);
            let backup_exists = self.fs.exists(&backup);
            let reuses_backup = backup_exists
                && self.options.policy == BackupPolicy::Keep
                && self.options.owns_backup(&backup);
            if backup_exists && !reuses_backup && self.options.policy != BackupPolicy::Refresh {
                preview.errors.push(ItemFailure {
                    index,
                    error: DeployError::BackupExists {
                        path: target,
                        backup,
                    },
                });
                continue;
            }

            preview.planned.push(PlannedItem {
                index,
                target,
                backup: Some(backup),
                reuses_backup,
            });
        }

        preview
    }

    fn apply_item(
        &self,
        index: usize,
        item: &DeploymentItem,
        root: &Path,
        seen: &mut HashMap<SafePath, usize>,
        result: &mut ApplyResult,
        event_sink: &dyn DeployEventSink,
    ) -> Result<AppliedAction, DeployError> {
        let safe = self.validate(index, item, seen)?;
        let target = safe.resolve(root);

        self.ensure_parent_dirs(root, &safe, result, event_sink)?;

        if !self.fs.exists(&target) {
            self.fs
                .write(&target, item.content())
                .map_err(|source| DeployError::WriteFailed {
                    path: target.clone(),
                    source,
                })?;
            return Ok(AppliedAction::created(target));
        }

        let backup = self.options.suffix.backup_path(&target);
        let fresh_backup = self.secure_backup(index, &target, &backup, event_sink)?;

        if let Err(source) = self.fs.write(&target, item.content()) {
            // Original is untouched; drop a backup nobody will restore.
            if fresh_backup {
                if let Err(e) = self.fs.remove_file(&backup) {
                    tracing::warn!(backup = %backup.display(), "could not remove unused backup: {}", e);
                }
            }
            return Err(DeployError::WriteFailed {
                path: target,
                source,
            });
        }

        Ok(AppliedAction::replaced(target, backup))
    }

    /// Check the item path and reject repeats within this run
    fn validate(
        &self,
        index: usize,
        item: &DeploymentItem,
        seen: &mut HashMap<SafePath, usize>,
    ) -> Result<SafePath, DeployError> {
        let raw = item.relative_path();
        let invalid = |reason| DeployError::InvalidPath {
            path: raw.to_path_buf(),
            reason,
        };

        let safe = SafePath::new(raw).map_err(invalid)?;
        if self.options.suffix.is_reserved(safe.as_path()) {
            return Err(invalid(PathError::ReservedSuffix(
                self.options.suffix.to_string(),
            )));
        }

        if let Some(&first_index) = seen.get(&safe) {
            return Err(DeployError::DuplicatePath {
                path: raw.to_path_buf(),
                first_index,
            });
        }
        seen.insert(safe.clone(), index);

        Ok(safe)
    }

    /// Directories between `root` and the item's parent that do not exist yet
    fn missing_parents(&self, root: &Path, safe: &SafePath) -> Vec<PathBuf> {
        let mut missing = Vec::new();
        let mut current = root.to_path_buf();
        if let Some(parent) = safe.as_path().parent() {
            for component in parent.components() {
                current.push(component);
                if !self.fs.exists(&current) {
                    missing.push(current.clone());
                }
            }
        }
        missing
    }

    /// Create missing parent directories one level at a time
    fn ensure_parent_dirs(
        &self,
        root: &Path,
        safe: &SafePath,
        result: &mut ApplyResult,
        event_sink: &dyn DeployEventSink,
    ) -> Result<(), DeployError> {
        let Some(parent) = safe.as_path().parent() else {
            return Ok(());
        };

        let mut current = root.to_path_buf();
        for component in parent.components() {
            current.push(component);

            if self.fs.is_dir(&current) {
                continue;
            }
            if self.fs.exists(&current) {
                return Err(DeployError::DirectoryCreateFailed {
                    path: current.clone(),
                    source: FsError::Other(format!(
                        "{} exists and is not a directory",
                        current.display()
                    )),
                });
            }

            self.fs
                .create_dir(&current)
                .map_err(|source| DeployError::DirectoryCreateFailed {
                    path: current.clone(),
                    source,
                })?;

            tracing::debug!(dir = %current.display(), "directory created");
            if event_sink.wants_detailed_events() {
                event_sink.on_event(DeployEvent::DirCreated {
                    path: current.clone(),
                });
            }
            result.add_dir(current.clone());
        }

        Ok(())
    }

    /// Make sure `backup` holds a copy of `target`
    ///
    /// Returns true when the backup was created by this call. An existing
    /// file at `backup` is only reused under `Keep` when an earlier manifest
    /// recorded it; anything else there is treated as foreign.
    fn secure_backup(
        &self,
        index: usize,
        target: &Path,
        backup: &Path,
        event_sink: &dyn DeployEventSink,
    ) -> Result<bool, DeployError> {
        let backup_failed = |source| DeployError::BackupCopyFailed {
            path: target.to_path_buf(),
            backup: backup.to_path_buf(),
            source,
        };
        let existed = self.fs.exists(backup);

        let previous = if existed {
            match self.options.policy {
                BackupPolicy::Keep if self.options.owns_backup(backup) => {
                    tracing::debug!(backup = %backup.display(), "keeping existing backup");
                    if event_sink.wants_detailed_events() {
                        event_sink.on_event(DeployEvent::BackedUp {
                            index,
                            path: target.to_path_buf(),
                            backup: backup.to_path_buf(),
                            reused: true,
                        });
                    }
                    return Ok(false);
                }
                BackupPolicy::Keep | BackupPolicy::Fail => {
                    return Err(DeployError::BackupExists {
                        path: target.to_path_buf(),
                        backup: backup.to_path_buf(),
                    })
                }
                BackupPolicy::Refresh => Some(self.fs.read(backup).map_err(backup_failed)?),
            }
        } else {
            None
        };

        let copied = self.fs.copy(target, backup).and_then(|()| {
            if self.options.verify {
                self.verify_backup(target, backup)
            } else {
                Ok(())
            }
        });

        if let Err(source) = copied {
            self.discard_backup(backup, previous.as_deref());
            return Err(backup_failed(source));
        }

        if event_sink.wants_detailed_events() {
            event_sink.on_event(DeployEvent::BackedUp {
                index,
                path: target.to_path_buf(),
                backup: backup.to_path_buf(),
                reused: false,
            });
        }

        Ok(!existed)
    }

    /// Undo a failed backup: put back the refreshed file or drop the new one
    fn discard_backup(&self, backup: &Path, previous: Option<&[u8]>) {
        let outcome = match previous {
            Some(bytes) => self.fs.write(backup, bytes),
            None if self.fs.exists(backup) => self.fs.remove_file(backup),
            None => Ok(()),
        };
        if let Err(e) = outcome {
            tracing::warn!(backup = %backup.display(), "could not clean up failed backup: {}", e);
        }
    }

    fn verify_backup(&self, target: &Path, backup: &Path) -> Result<(), FsError> {
        let original = self.fs.hash(target)?;
        let copy = self.fs.hash(backup)?;
        if original != copy {
            return Err(FsError::Other(format!(
                "backup content differs from original ({} != {})",
                copy, original
            )));
        }
        Ok(())
    }
}
