//! Output Rendering
//!
//! End-of-run summaries for apply, dry runs, undo and `show`. Per-file lines
//! come from the event sinks; this module renders what is left once a run is
//! over.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::application::apply::{ApplyPreview, ApplyResult};
use crate::application::undo::{EntryKind, UndoResult};
use crate::domain::entities::RollbackManifest;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

/// Summary after a real apply run
pub fn render_apply_summary<W: Write>(
    out: &mut W,
    format: OutputFormat,
    result: &ApplyResult,
    manifest_path: Option<&Path>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let errors: Vec<_> = result
                .errors
                .iter()
                .map(|f| {
                    json!({
                        "index": f.index,
                        "path": path_str(f.error.path()),
                        "kind": f.error.kind(),
                        "message": f.error.to_string(),
                    })
                })
                .collect();
            let value = json!({
                "type": "apply_summary",
                "root": path_str(&result.root),
                "created": result.created_count(),
                "replaced": result.replaced_count(),
                "dirs_created": result.dirs_created.len(),
                "errors": errors,
                "manifest": manifest_path.map(path_str),
            });
            writeln!(out, "{}", value)
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Applied {} of {} item(s) under {}: {} created, {} replaced",
                result.actions.len(),
                result.actions.len() + result.errors.len(),
                result.root.display(),
                result.created_count(),
                result.replaced_count()
            )?;
            match manifest_path {
                Some(path) => writeln!(out, "Rollback manifest: {}", path.display())?,
                None => writeln!(out, "Nothing changed; no rollback manifest written")?,
            }
            if !result.errors.is_empty() {
                writeln!(out, "{} item(s) failed:", result.errors.len())?;
                for failure in &result.errors {
                    writeln!(out, "  #{} {}", failure.index, failure.error)?;
                }
            }
            Ok(())
        }
    }
}

/// Dry run report
pub fn render_preview<W: Write>(
    out: &mut W,
    format: OutputFormat,
    root: &Path,
    preview: &ApplyPreview,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let planned: Vec<_> = preview
                .planned
                .iter()
                .map(|p| {
                    let action = if p.backup.is_some() { "replace" } else { "create" };
                    json!({
                        "index": p.index,
                        "path": path_str(&p.target),
                        "action": action,
                        "backup": p.backup.as_deref().map(path_str),
                        "reuses_backup": p.reuses_backup,
                    })
                })
                .collect();
            let errors: Vec<_> = preview
                .errors
                .iter()
                .map(|f| {
                    json!({
                        "index": f.index,
                        "path": path_str(f.error.path()),
                        "kind": f.error.kind(),
                        "message": f.error.to_string(),
                    })
                })
                .collect();
            let value = json!({
                "type": "apply_preview",
                "root": path_str(root),
                "planned": planned,
                "dirs_to_create": preview.dirs_to_create.iter().map(|d| path_str(d)).collect::<Vec<_>>(),
                "errors": errors,
            });
            writeln!(out, "{}", value)
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Dry run under {}: {} to create, {} to replace",
                root.display(),
                preview.create_count(),
                preview.replace_count()
            )?;
            for dir in &preview.dirs_to_create {
                writeln!(out, "  [MKDIR] {}", dir.display())?;
            }
            for planned in &preview.planned {
                match &planned.backup {
                    None => writeln!(out, "  [CREATE] {}", planned.target.display())?,
                    Some(backup) if planned.reuses_backup => writeln!(
                        out,
                        "  [REPLACE] {} (keeps existing backup {})",
                        planned.target.display(),
                        backup.display()
                    )?,
                    Some(backup) => writeln!(
                        out,
                        "  [REPLACE] {} (backup {})",
                        planned.target.display(),
                        backup.display()
                    )?,
                }
            }
            for failure in &preview.errors {
                writeln!(out, "  [ERROR] #{} {}", failure.index, failure.error)?;
            }
            Ok(())
        }
    }
}

/// Summary after an undo run
pub fn render_undo_summary<W: Write>(
    out: &mut W,
    format: OutputFormat,
    result: &UndoResult,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let failures: Vec<_> = result
                .entries
                .iter()
                .filter_map(|e| e.error().map(|err| (e, err)))
                .map(|(entry, err)| {
                    let action = match entry.kind {
                        EntryKind::Remove => "remove",
                        EntryKind::Restore => "restore",
                    };
                    json!({
                        "path": path_str(&entry.path),
                        "action": action,
                        "kind": err.kind(),
                        "message": err.to_string(),
                    })
                })
                .collect();
            let value = json!({
                "type": "undo_summary",
                "removed": result.removed_count(),
                "restored": result.restored_count(),
                "skipped": result.skipped_count(),
                "pruned_dirs": result.pruned_dirs.len(),
                "errors": failures,
            });
            writeln!(out, "{}", value)
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Undo finished: {} removed, {} restored, {} skipped, {} failed",
                result.removed_count(),
                result.restored_count(),
                result.skipped_count(),
                result.error_count()
            )?;
            for error in result.errors() {
                writeln!(out, "  {}", error)?;
            }
            Ok(())
        }
    }
}

/// Full manifest listing for `show`
pub fn render_manifest<W: Write>(
    out: &mut W,
    format: OutputFormat,
    manifest: &RollbackManifest,
    manifest_path: &Path,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let backups: serde_json::Map<String, serde_json::Value> = manifest
                .backups_to_restore()
                .map(|(original, backup)| (path_str(original), json!(path_str(backup))))
                .collect();
            let value = json!({
                "manifest": path_str(manifest_path),
                "version": manifest.version(),
                "root": path_str(manifest.root()),
                "created_at": manifest.created_at().to_rfc3339(),
                "files_to_remove": manifest.files_to_remove().iter().map(|p| path_str(p)).collect::<Vec<_>>(),
                "backups_to_restore": backups,
                "dirs_created": manifest.dirs_created().iter().map(|p| path_str(p)).collect::<Vec<_>>(),
            });
            writeln!(out, "{}", value)
        }
        OutputFormat::Text => {
            writeln!(out, "Rollback manifest: {}", manifest_path.display())?;
            writeln!(out, "  version: {}", manifest.version())?;
            writeln!(out, "  root:    {}", manifest.root().display())?;
            writeln!(out, "  created: {}", manifest.created_at().to_rfc3339())?;

            let files = manifest.files_to_remove();
            writeln!(out, "Files to remove ({}):", files.len())?;
            for path in files {
                writeln!(out, "  {}", path.display())?;
            }

            let backups: Vec<_> = manifest.backups_to_restore().collect();
            writeln!(out, "Backups to restore ({}):", backups.len())?;
            for (original, backup) in backups {
                writeln!(out, "  {} <- {}", original.display(), backup.display())?;
            }

            let dirs = manifest.dirs_created();
            if !dirs.is_empty() {
                writeln!(out, "Directories created ({}):", dirs.len())?;
                for dir in dirs {
                    writeln!(out, "  {}", dir.display())?;
                }
            }
            Ok(())
        }
    }
}
