//! ManifestRepository port - abstraction for rollback manifest persistence
//!
//! This trait allows the application layer to load/save manifests
//! without knowing about the on-disk format.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::RollbackManifest;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest persistence errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest at the given path
    #[error("rollback manifest not found: {0}")]
    NotFound(PathBuf),

    /// Refusing to replace an existing manifest
    #[error("rollback manifest already exists: {0} (run undo first, or pass --force)")]
    AlreadyExists(PathBuf),

    /// Manifest could not be parsed
    #[error("invalid rollback manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Manifest could not be serialized
    #[error("failed to serialize rollback manifest: {0}")]
    Serialize(String),

    /// Unsupported format version
    #[error("rollback manifest version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    /// I/O error
    #[error("I/O error on rollback manifest: {0}")]
    Io(String),
}

/// Abstract repository for rollback manifest persistence
pub trait ManifestRepository {
    /// Load a manifest
    fn load(&self, path: &Path) -> ManifestResult<RollbackManifest>;

    /// Save a manifest, replacing any existing file
    fn save(&self, manifest: &RollbackManifest, path: &Path) -> ManifestResult<()>;

    /// Check whether a manifest exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Delete a manifest (no-op when absent)
    fn delete(&self, path: &Path) -> ManifestResult<()>;
}
