//! Rollback Writer
//!
//! Turns the actions of an apply run into a `RollbackManifest` and persists
//! it through a `ManifestRepository`.

use std::path::{Path, PathBuf};

use crate::domain::entities::{AppliedAction, RollbackManifest};
use crate::domain::ports::{ManifestError, ManifestRepository, ManifestResult};

use super::apply::ApplyResult;

pub struct RollbackWriter<R>
where
    R: ManifestRepository,
{
    repo: R,
}

impl<R> RollbackWriter<R>
where
    R: ManifestRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fail early if `destination` holds a manifest that must not be replaced
    ///
    /// Called before apply so a refused manifest never leaves changes on disk
    /// without a rollback record.
    pub fn check_destination(&self, destination: &Path, overwrite: bool) -> ManifestResult<()> {
        if !overwrite && self.repo.exists(destination) {
            return Err(ManifestError::AlreadyExists(destination.to_path_buf()));
        }
        Ok(())
    }

    /// Partition `actions` into a manifest and save it at `destination`
    pub fn write(
        &self,
        root: &Path,
        actions: &[AppliedAction],
        dirs_created: &[PathBuf],
        destination: &Path,
        overwrite: bool,
    ) -> ManifestResult<RollbackManifest> {
        self.check_destination(destination, overwrite)?;

        let manifest =
            RollbackManifest::from_actions(root, actions).with_dirs_created(dirs_created.to_vec());
        self.repo.save(&manifest, destination)?;

        tracing::info!(
            manifest = %destination.display(),
            remove = manifest.files_to_remove().len(),
            restore = manifest.len() - manifest.files_to_remove().len(),
            "rollback manifest written"
        );
        Ok(manifest)
    }

    /// Write the manifest for a finished apply run
    pub fn write_result(
        &self,
        result: &ApplyResult,
        destination: &Path,
        overwrite: bool,
    ) -> ManifestResult<RollbackManifest> {
        self.write(
            &result.root,
            &result.actions,
            &result.dirs_created,
            destination,
            overwrite,
        )
    }
}
