//! Fault-injecting FileSystem for tests
//!
//! Wraps `LocalFs` and fails chosen operations on chosen paths, so partial
//! failure can be exercised without relying on OS permissions (tests often
//! run as root, where permission bits are ignored).

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

use super::LocalFs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Write,
    Copy,
    Rename,
    RemoveFile,
    CreateDir,
}

#[derive(Default)]
pub(crate) struct FaultyFs {
    inner: LocalFs,
    faults: RefCell<HashSet<(Op, PathBuf)>>,
    /// Copies to these paths succeed but write garbage
    corrupt_copies: RefCell<HashSet<PathBuf>>,
}

impl FaultyFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail `op` whenever it touches `path` (as source or destination)
    pub(crate) fn fail(self, op: Op, path: impl Into<PathBuf>) -> Self {
        self.faults.borrow_mut().insert((op, path.into()));
        self
    }

    pub(crate) fn corrupt_copy_to(self, path: impl Into<PathBuf>) -> Self {
        self.corrupt_copies.borrow_mut().insert(path.into());
        self
    }

    fn check(&self, op: Op, paths: &[&Path]) -> FsResult<()> {
        let faults = self.faults.borrow();
        for path in paths {
            if faults.contains(&(op, path.to_path_buf())) {
                return Err(FsError::PermissionDenied(path.to_path_buf()));
            }
        }
        Ok(())
    }
}

impl FileSystem for FaultyFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.check(Op::Write, &[path])?;
        self.inner.write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.check(Op::Copy, &[from, to])?;
        if self.corrupt_copies.borrow().contains(to) {
            return std::fs::write(to, b"garbage").map_err(|e| FsError::from_io(to, e));
        }
        self.inner.copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.check(Op::Rename, &[from, to])?;
        self.inner.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.check(Op::RemoveFile, &[path])?;
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_dir(path)
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        self.check(Op::CreateDir, &[path])?;
        self.inner.create_dir(path)
    }
}
