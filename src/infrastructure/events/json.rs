//! JSON Event Sink
//!
//! Outputs apply/undo events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn status(error_count: usize) -> &'static str {
    if error_count == 0 {
        "success"
    } else {
        "partial"
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::ApplyStarted { root, item_count } => serde_json::json!({
                "event": "start",
                "command": "apply",
                "root": root.display().to_string(),
                "item_count": item_count,
            }),

            DeployEvent::DirCreated { path } => serde_json::json!({
                "event": "dir_created",
                "command": "apply",
                "path": path.display().to_string(),
            }),

            DeployEvent::BackedUp {
                index,
                path,
                backup,
                reused,
            } => serde_json::json!({
                "event": "item_backed_up",
                "command": "apply",
                "index": index,
                "path": path.display().to_string(),
                "backup": backup.display().to_string(),
                "reused": reused,
            }),

            DeployEvent::Written {
                index,
                path,
                created,
            } => serde_json::json!({
                "event": "item_written",
                "command": "apply",
                "index": index,
                "path": path.display().to_string(),
                "created": created,
            }),

            DeployEvent::ItemFailed { index, path, error } => serde_json::json!({
                "event": "item_error",
                "command": "apply",
                "index": index,
                "path": path.display().to_string(),
                "error": error,
            }),

            DeployEvent::ApplyCompleted {
                created_count,
                replaced_count,
                error_count,
            } => serde_json::json!({
                "event": "complete",
                "command": "apply",
                "status": status(error_count),
                "created": created_count,
                "replaced": replaced_count,
                "errors": error_count,
            }),

            DeployEvent::UndoStarted { root, entry_count } => serde_json::json!({
                "event": "start",
                "command": "undo",
                "root": root.display().to_string(),
                "entry_count": entry_count,
            }),

            DeployEvent::Removed { path } => serde_json::json!({
                "event": "entry_removed",
                "command": "undo",
                "path": path.display().to_string(),
            }),

            DeployEvent::Restored { path, backup } => serde_json::json!({
                "event": "entry_restored",
                "command": "undo",
                "path": path.display().to_string(),
                "backup": backup.display().to_string(),
            }),

            DeployEvent::EntrySkipped { path, reason } => serde_json::json!({
                "event": "entry_skipped",
                "command": "undo",
                "path": path.display().to_string(),
                "reason": reason,
            }),

            DeployEvent::EntryFailed { path, error } => serde_json::json!({
                "event": "entry_error",
                "command": "undo",
                "path": path.display().to_string(),
                "error": error,
            }),

            DeployEvent::DirPruned { path } => serde_json::json!({
                "event": "dir_pruned",
                "command": "undo",
                "path": path.display().to_string(),
            }),

            DeployEvent::UndoCompleted {
                removed_count,
                restored_count,
                skipped_count,
                error_count,
            } => serde_json::json!({
                "event": "complete",
                "command": "undo",
                "status": status(error_count),
                "removed": removed_count,
                "restored": restored_count,
                "skipped": skipped_count,
                "errors": error_count,
            }),
        };

        self.write_event(json);
    }
}
