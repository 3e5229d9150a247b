//! Deploy Event Port
//!
//! Provides an observable interface for apply and undo runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// Event emitted during apply or undo
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Apply started
    ApplyStarted { root: PathBuf, item_count: usize },

    /// A directory was created for an item
    DirCreated { path: PathBuf },

    /// An existing file was secured before being overwritten
    BackedUp {
        index: usize,
        path: PathBuf,
        backup: PathBuf,
        /// An earlier backup was kept instead of taking a new one
        reused: bool,
    },

    /// Item content was written
    Written {
        index: usize,
        path: PathBuf,
        created: bool,
    },

    /// Item could not be deployed
    ItemFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },

    /// Apply completed
    ApplyCompleted {
        created_count: usize,
        replaced_count: usize,
        error_count: usize,
    },

    /// Undo started
    UndoStarted { root: PathBuf, entry_count: usize },

    /// A file created by apply was deleted
    Removed { path: PathBuf },

    /// A backup was moved back over its original
    Restored { path: PathBuf, backup: PathBuf },

    /// Entry needed no work
    EntrySkipped { path: PathBuf, reason: String },

    /// Entry could not be processed
    EntryFailed { path: PathBuf, error: String },

    /// An empty directory was removed
    DirPruned { path: PathBuf },

    /// Undo completed
    UndoCompleted {
        removed_count: usize,
        restored_count: usize,
        skipped_count: usize,
        error_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: one line per action in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-file events
    ///
    /// Summary sinks only care about started/completed events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
