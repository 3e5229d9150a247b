//! DeploymentItem entity - one file to be written
//!
//! Items are produced by a plan source before deployment starts and never
//! change afterwards. Content is treated as an opaque byte blob.

use std::path::{Path, PathBuf};

/// A file to be written, keyed by its path relative to the deployment root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentItem {
    relative_path: PathBuf,
    content: Vec<u8>,
}

impl DeploymentItem {
    /// Create a new item
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    /// Path relative to the deployment root
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content size in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
