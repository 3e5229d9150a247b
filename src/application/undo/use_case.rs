//! Undo Use Case

use std::path::{Component, Path};

use crate::domain::entities::RollbackManifest;
use crate::domain::ports::{DeployEvent, DeployEventSink, FileSystem, NoopEventSink};
use crate::error::UndoError;

use super::result::{EntryKind, EntryOutcome, SkipReason, UndoResult};

/// Undo use case - reverses one apply run from its manifest
///
/// Order matters: created files go first, then created directories
/// (deepest first), then backups are moved back. Re-running against an
/// already restored tree only produces skipped entries.
pub struct UndoUseCase<FS>
where
    FS: FileSystem,
{
    fs: FS,
}

impl<FS> UndoUseCase<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn execute(&self, manifest: &RollbackManifest) -> UndoResult {
        self.execute_with_events(manifest, &NoopEventSink)
    }

    pub fn execute_with_events(
        &self,
        manifest: &RollbackManifest,
        event_sink: &dyn DeployEventSink,
    ) -> UndoResult {
        let mut result = UndoResult::new();
        let root = manifest.root();

        tracing::info!(root = %root.display(), entries = manifest.len(), "undo started");
        event_sink.on_event(DeployEvent::UndoStarted {
            root: root.to_path_buf(),
            entry_count: manifest.len(),
        });

        for path in manifest.files_to_remove() {
            let outcome = self.remove_created(root, path, &mut result, event_sink);
            self.report(path, &outcome, event_sink);
            result.add(EntryKind::Remove, path.clone(), None, outcome);
        }

        for dir in manifest.dirs_created().iter().rev() {
            if self.fs.is_dir(dir) {
                self.prune_dir(root, dir, &mut result, event_sink);
            }
        }

        for (original, backup) in manifest.backups_to_restore() {
            let outcome = self.restore_backup(root, original, backup);
            if matches!(outcome, EntryOutcome::Done) {
                tracing::debug!(path = %original.display(), "restored");
                if event_sink.wants_detailed_events() {
                    event_sink.on_event(DeployEvent::Restored {
                        path: original.to_path_buf(),
                        backup: backup.to_path_buf(),
                    });
                }
            } else {
                self.report(original, &outcome, event_sink);
            }
            result.add(
                EntryKind::Restore,
                original.to_path_buf(),
                Some(backup.to_path_buf()),
                outcome,
            );
        }

        tracing::info!(
            removed = result.removed_count(),
            restored = result.restored_count(),
            skipped = result.skipped_count(),
            errors = result.error_count(),
            "undo finished"
        );
        event_sink.on_event(DeployEvent::UndoCompleted {
            removed_count: result.removed_count(),
            restored_count: result.restored_count(),
            skipped_count: result.skipped_count(),
            error_count: result.error_count(),
        });

        result
    }

    fn remove_created(
        &self,
        root: &Path,
        path: &Path,
        result: &mut UndoResult,
        event_sink: &dyn DeployEventSink,
    ) -> EntryOutcome {
        if !is_inside(root, path) {
            return EntryOutcome::Skipped(SkipReason::OutsideRoot);
        }
        if !self.fs.exists(path) {
            return EntryOutcome::Skipped(SkipReason::AlreadyAbsent);
        }

        match self.fs.remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed");
                if event_sink.wants_detailed_events() {
                    event_sink.on_event(DeployEvent::Removed {
                        path: path.to_path_buf(),
                    });
                }
                if let Some(parent) = path.parent() {
                    self.prune_dir(root, parent, result, event_sink);
                }
                EntryOutcome::Done
            }
            Err(source) if source.is_not_found() => EntryOutcome::Skipped(SkipReason::AlreadyAbsent),
            Err(source) => EntryOutcome::Failed(UndoError::RemoveFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn restore_backup(&self, root: &Path, original: &Path, backup: &Path) -> EntryOutcome {
        if !is_inside(root, original) || !is_inside(root, backup) {
            return EntryOutcome::Skipped(SkipReason::OutsideRoot);
        }
        if !self.fs.exists(backup) {
            return EntryOutcome::Skipped(SkipReason::BackupMissing);
        }

        match self.fs.rename(backup, original) {
            Ok(()) => EntryOutcome::Done,
            Err(source) => EntryOutcome::Failed(UndoError::RestoreMoveFailed {
                path: original.to_path_buf(),
                backup: backup.to_path_buf(),
                source,
            }),
        }
    }

    /// Remove `dir` if it is empty; never the root itself
    fn prune_dir(
        &self,
        root: &Path,
        dir: &Path,
        result: &mut UndoResult,
        event_sink: &dyn DeployEventSink,
    ) {
        if dir == root || !is_inside(root, dir) {
            return;
        }

        match self.fs.remove_dir(dir) {
            Ok(()) => {
                tracing::debug!(dir = %dir.display(), "pruned empty directory");
                if event_sink.wants_detailed_events() {
                    event_sink.on_event(DeployEvent::DirPruned {
                        path: dir.to_path_buf(),
                    });
                }
                result.add_pruned(dir.to_path_buf());
            }
            Err(e) => tracing::trace!(dir = %dir.display(), "directory kept: {}", e),
        }
    }

    fn report(&self, path: &Path, outcome: &EntryOutcome, event_sink: &dyn DeployEventSink) {
        match outcome {
            EntryOutcome::Done => {}
            EntryOutcome::Skipped(reason) => {
                tracing::debug!(path = %path.display(), %reason, "skipped");
                if event_sink.wants_detailed_events() {
                    event_sink.on_event(DeployEvent::EntrySkipped {
                        path: path.to_path_buf(),
                        reason: reason.to_string(),
                    });
                }
            }
            EntryOutcome::Failed(error) => {
                tracing::warn!(kind = error.kind(), "{}", error);
                event_sink.on_event(DeployEvent::EntryFailed {
                    path: path.to_path_buf(),
                    error: error.to_string(),
                });
            }
        }
    }
}

/// `path` lies strictly below `root`
fn is_inside(root: &Path, path: &Path) -> bool {
    path != root
        && path.starts_with(root)
        && !path.components().any(|c| matches!(c, Component::ParentDir))
}
