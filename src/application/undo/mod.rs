//! Undo Module
//!
//! The Undo Executor: replays a `RollbackManifest` against the filesystem.
//! Created files are deleted, created directories pruned, backups moved back.
//! Every entry is attempted; one failure never stops the rest.

mod result;
mod use_case;

pub use result::{EntryKind, EntryOutcome, SkipReason, UndoEntry, UndoResult};
pub use use_case::UndoUseCase;
