//! Apply result types

use std::path::{Path, PathBuf};

use crate::domain::entities::{AppliedAction, RollbackManifest};
use crate::error::DeployError;

/// An item that was not applied
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the item in the input
    pub index: usize,
    pub error: DeployError,
}

/// Result of an apply run
#[derive(Debug)]
pub struct ApplyResult {
    /// Deployment root the items were resolved against
    pub root: PathBuf,
    /// One action per successfully applied item, in input order
    pub actions: Vec<AppliedAction>,
    /// Directories created along the way, shallowest first
    pub dirs_created: Vec<PathBuf>,
    /// Items that were not applied
    pub errors: Vec<ItemFailure>,
}

impl ApplyResult {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            actions: Vec::new(),
            dirs_created: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: AppliedAction) {
        self.actions.push(action);
    }

    pub fn add_dir(&mut self, dir: PathBuf) {
        self.dirs_created.push(dir);
    }

    pub fn add_error(&mut self, index: usize, error: DeployError) {
        self.errors.push(ItemFailure { index, error });
    }

    pub fn created_count(&self) -> usize {
        self.actions.iter().filter(|a| a.created_new()).count()
    }

    pub fn replaced_count(&self) -> usize {
        self.actions.len() - self.created_count()
    }

    /// Action recorded for `target`, if the item was applied
    pub fn action_for(&self, target: &Path) -> Option<&AppliedAction> {
        self.actions.iter().find(|a| a.target_path() == target)
    }

    /// Nothing was touched on disk
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty() && self.dirs_created.is_empty()
    }

    /// Every item was applied
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rollback manifest that reverses this run
    pub fn manifest(&self) -> RollbackManifest {
        RollbackManifest::from_actions(&self.root, &self.actions)
            .with_dirs_created(self.dirs_created.clone())
    }
}

/// What apply would do with one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub index: usize,
    pub target: PathBuf,
    /// Backup that would protect the existing file (None: file is new)
    pub backup: Option<PathBuf>,
    /// The backup already exists and would be kept as is
    pub reuses_backup: bool,
}

/// Result of a dry run
#[derive(Debug, Default)]
pub struct ApplyPreview {
    pub planned: Vec<PlannedItem>,
    /// Directories that would be created
    pub dirs_to_create: Vec<PathBuf>,
    pub errors: Vec<ItemFailure>,
}

impl ApplyPreview {
    pub fn create_count(&self) -> usize {
        self.planned.iter().filter(|p| p.backup.is_none()).count()
    }

    pub fn replace_count(&self) -> usize {
        self.planned.len() - self.create_count()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
