//! Console Event Sink
//!
//! Prints one tagged line per action, e.g. `[BACKUP] a.txt -> a.txt.bak`.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Human-readable progress output
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let text = match event {
            DeployEvent::ApplyStarted { root, item_count } => format!(
                "=== APPLY: {} item(s) into {} ===",
                item_count,
                root.display()
            ),
            DeployEvent::DirCreated { path } => format!("[MKDIR] {}", path.display()),
            DeployEvent::BackedUp {
                path,
                backup,
                reused: false,
                ..
            } => format!("[BACKUP] {} -> {}", path.display(), backup.display()),
            DeployEvent::BackedUp {
                path,
                backup,
                reused: true,
                ..
            } => format!(
                "[BACKUP] {} (keeping existing {})",
                path.display(),
                backup.display()
            ),
            DeployEvent::Written { path, created, .. } => {
                let tag = if created { "CREATE" } else { "WRITE" };
                format!("[{}] {}", tag, path.display())
            }
            DeployEvent::ItemFailed { path, error, .. } => {
                format!("[ERROR] {}: {}", path.display(), error)
            }
            DeployEvent::ApplyCompleted {
                created_count,
                replaced_count,
                error_count,
            } => format!(
                "=== APPLY COMPLETE: {} created, {} replaced, {} error(s) ===",
                created_count, replaced_count, error_count
            ),
            DeployEvent::UndoStarted { root, entry_count } => format!(
                "=== UNDO: {} entr{} under {} ===",
                entry_count,
                if entry_count == 1 { "y" } else { "ies" },
                root.display()
            ),
            DeployEvent::Removed { path } => format!("[DELETED] {}", path.display()),
            DeployEvent::Restored { path, .. } => format!("[RESTORED] {}", path.display()),
            DeployEvent::EntrySkipped { path, reason } => {
                format!("[SKIPPED] {} ({})", path.display(), reason)
            }
            DeployEvent::EntryFailed { path, error } => {
                format!("[ERROR] {}: {}", path.display(), error)
            }
            DeployEvent::DirPruned { path } => format!("[RMDIR] {}", path.display()),
            DeployEvent::UndoCompleted {
                removed_count,
                restored_count,
                skipped_count,
                error_count,
            } => format!(
                "=== UNDO COMPLETE: {} removed, {} restored, {} skipped, {} error(s) ===",
                removed_count, restored_count, skipped_count, error_count
            ),
        };
        self.line(text);
    }
}
