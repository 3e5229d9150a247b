//! Undo result types

use std::path::PathBuf;

use crate::error::UndoError;

/// Reason an entry needed no work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The created file is already gone
    AlreadyAbsent,
    /// The backup is gone (already restored, or removed by hand)
    BackupMissing,
    /// Entry points outside the manifest root
    OutsideRoot,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyAbsent => write!(f, "already absent"),
            SkipReason::BackupMissing => write!(f, "backup missing"),
            SkipReason::OutsideRoot => write!(f, "outside deployment root"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Remove,
    Restore,
}

#[derive(Debug)]
pub enum EntryOutcome {
    Done,
    Skipped(SkipReason),
    Failed(UndoError),
}

/// Outcome for one manifest entry
#[derive(Debug)]
pub struct UndoEntry {
    pub path: PathBuf,
    /// Backup the file was restored from (restore entries only)
    pub backup: Option<PathBuf>,
    pub kind: EntryKind,
    pub outcome: EntryOutcome,
}

impl UndoEntry {
    pub fn is_done(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Skipped(_))
    }

    pub fn error(&self) -> Option<&UndoError> {
        match &self.outcome {
            EntryOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of replaying one manifest
#[derive(Debug, Default)]
pub struct UndoResult {
    /// Removal entries first (manifest order), then restores
    pub entries: Vec<UndoEntry>,
    /// Directories removed because they were left empty
    pub pruned_dirs: Vec<PathBuf>,
}

impl UndoResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        kind: EntryKind,
        path: PathBuf,
        backup: Option<PathBuf>,
        outcome: EntryOutcome,
    ) {
        self.entries.push(UndoEntry {
            path,
            backup,
            kind,
            outcome,
        });
    }

    pub fn add_pruned(&mut self, dir: PathBuf) {
        self.pruned_dirs.push(dir);
    }

    pub fn removed_count(&self) -> usize {
        self.count(EntryKind::Remove)
    }

    pub fn restored_count(&self) -> usize {
        self.count(EntryKind::Restore)
    }

    pub fn skipped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_skipped()).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &UndoError> {
        self.entries.iter().filter_map(UndoEntry::error)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// No entry hit an I/O error (skips count as success)
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    fn count(&self, kind: EntryKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && e.is_done())
            .count()
    }
}
