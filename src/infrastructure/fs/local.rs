//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temp file in the target's directory and are renamed into
/// place, so a failed write never leaves a truncated target behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".safedeploy-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| FsError::from_io(path, e))?;
        tmp.write_all(content)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| FsError::from_io(path, e))?;

        // Keep the mode of the file being replaced
        if let Ok(meta) = std::fs::metadata(path) {
            if meta.is_file() {
                let _ = tmp.as_file().set_permissions(meta.permissions());
            }
        }

        tmp.persist(path)
            .map(|_| ())
            .map_err(|e| FsError::from_io(path, e.error))
    }

    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        if from.is_dir() {
            return Err(FsError::Other(format!(
                "{} is a directory, not a file",
                from.display()
            )));
        }
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::from_io(from, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        match std::fs::rename(from, to) {
            Ok(()) => Ok(()),
            // Windows refuses to rename over an existing file
            Err(_) if cfg!(windows) && from.exists() && to.is_file() => {
                std::fs::remove_file(to).map_err(|e| FsError::from_io(to, e))?;
                std::fs::rename(from, to).map_err(|e| FsError::from_io(from, e))
            }
            Err(e) => Err(FsError::from_io(from, e)),
        }
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_dir(path).map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir(path).map_err(|e| FsError::from_io(path, e))
    }
}

/// Expand a leading `~` to the user's home directory
///
/// Paths without `~` are returned unchanged, as is everything when the home
/// directory cannot be determined.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
