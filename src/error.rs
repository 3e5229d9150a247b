//! Error types for safedeploy
//!
//! Uses `thiserror` for library errors. Per-item errors (`DeployError`) and
//! per-entry errors (`UndoError`) are collected into run results and never
//! abort a run; `SafedeployError` covers setup failures that do.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{FsError, ManifestError};
use crate::domain::value_objects::PathError;
use crate::infrastructure::plan::PlanError;

/// Result type alias for safedeploy operations
pub type SafedeployResult<T> = Result<T, SafedeployError>;

/// Why one deployment item was not applied
#[derive(Error, Debug)]
pub enum DeployError {
    /// Relative path failed validation
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: PathBuf, reason: PathError },

    /// Same relative path listed twice in one run
    #[error("duplicate path '{path}' in deployment (already handled by item {first_index})")]
    DuplicatePath { path: PathBuf, first_index: usize },

    /// A parent directory could not be created
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// The existing file could not be copied aside; it was left untouched
    #[error("failed to back up {path} to {backup}: {source}")]
    BackupCopyFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: FsError,
    },

    /// A file already sits at the backup path and may not be reused
    #[error("backup {backup} already exists for {path}")]
    BackupExists { path: PathBuf, backup: PathBuf },

    /// New content could not be written
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}

impl DeployError {
    /// Path the error is about (target path, or the raw item path)
    pub fn path(&self) -> &PathBuf {
        match self {
            DeployError::InvalidPath { path, .. }
            | DeployError::DuplicatePath { path, .. }
            | DeployError::DirectoryCreateFailed { path, .. }
            | DeployError::BackupCopyFailed { path, .. }
            | DeployError::BackupExists { path, .. }
            | DeployError::WriteFailed { path, .. } => path,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            DeployError::InvalidPath { .. } => "invalid_path",
            DeployError::DuplicatePath { .. } => "duplicate_path",
            DeployError::DirectoryCreateFailed { .. } => "directory_create_failed",
            DeployError::BackupCopyFailed { .. } => "backup_copy_failed",
            DeployError::BackupExists { .. } => "backup_exists",
            DeployError::WriteFailed { .. } => "write_failed",
        }
    }
}

/// Why one rollback entry could not be processed
#[derive(Error, Debug)]
pub enum UndoError {
    /// A file created by apply could not be deleted
    #[error("failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// A backup could not be moved back over its original
    #[error("failed to restore {path} from {backup}: {source}")]
    RestoreMoveFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: FsError,
    },
}

impl UndoError {
    pub fn path(&self) -> &PathBuf {
        match self {
            UndoError::RemoveFailed { path, .. } | UndoError::RestoreMoveFailed { path, .. } => {
                path
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UndoError::RemoveFailed { .. } => "remove_failed",
            UndoError::RestoreMoveFailed { .. } => "restore_move_failed",
        }
    }
}

/// Errors that stop a command before or after the per-item work
#[derive(Error, Debug)]
pub enum SafedeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Deployment root exists but is not a directory
    #[error("deployment root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// Deployment root cannot be recorded in a manifest
    #[error("deployment root is not valid UTF-8: {path}")]
    RootNotUtf8 { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
