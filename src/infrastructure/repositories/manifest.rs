//! TOML Rollback Manifest Repository
//!
//! Implements the ManifestRepository port using TOML format. Paths are
//! stored verbatim as absolute strings and the backup table is sorted, so
//! two manifests of the same run diff cleanly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{RollbackManifest, MANIFEST_VERSION};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_repository::{
    ManifestError, ManifestRepository, ManifestResult,
};
use crate::infrastructure::fs::LocalFs;

/// TOML-based manifest repository
pub struct TomlManifestRepository {
    fs: LocalFs,
}

impl TomlManifestRepository {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    /// Render a manifest as TOML text
    pub fn to_toml(manifest: &RollbackManifest) -> ManifestResult<String> {
        let doc = TomlManifest::from_manifest(manifest)?;
        toml::to_string_pretty(&doc).map_err(|e| ManifestError::Serialize(e.to_string()))
    }

    /// Parse TOML text; `path` is only used for error messages
    pub fn from_toml(content: &str, path: &Path) -> ManifestResult<RollbackManifest> {
        let doc: TomlManifest = toml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if doc.version != MANIFEST_VERSION {
            return Err(ManifestError::VersionMismatch {
                found: doc.version,
                expected: MANIFEST_VERSION,
            });
        }

        Ok(doc.into_manifest())
    }
}

impl Default for TomlManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlManifest {
    version: u32,
    root: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    files_to_remove: Vec<String>,
    #[serde(default)]
    dirs_created: Vec<String>,
    #[serde(default)]
    backups_to_restore: BTreeMap<String, String>,
}

fn path_to_string(path: &Path) -> ManifestResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        ManifestError::Serialize(format!("path is not valid UTF-8: {}", path.display()))
    })
}

impl TomlManifest {
    fn from_manifest(manifest: &RollbackManifest) -> ManifestResult<Self> {
        let files_to_remove = manifest
            .files_to_remove()
            .iter()
            .map(|p| path_to_string(p))
            .collect::<ManifestResult<Vec<_>>>()?;
        let dirs_created = manifest
            .dirs_created()
            .iter()
            .map(|p| path_to_string(p))
            .collect::<ManifestResult<Vec<_>>>()?;
        let mut backups_to_restore = BTreeMap::new();
        for (original, backup) in manifest.backups_to_restore() {
            backups_to_restore.insert(path_to_string(original)?, path_to_string(backup)?);
        }

        Ok(Self {
            version: manifest.version(),
            root: path_to_string(manifest.root())?,
            created_at: manifest.created_at(),
            files_to_remove,
            dirs_created,
            backups_to_restore,
        })
    }

    fn into_manifest(self) -> RollbackManifest {
        let mut manifest = RollbackManifest::new(PathBuf::from(self.root))
            .with_version(self.version)
            .with_created_at(self.created_at)
            .with_dirs_created(self.dirs_created.into_iter().map(PathBuf::from).collect());
        for path in self.files_to_remove {
            manifest = manifest.with_file_to_remove(path);
        }
        for (original, backup) in self.backups_to_restore {
            manifest = manifest.with_backup(original, backup);
        }
        manifest
    }
}

impl ManifestRepository for TomlManifestRepository {
    fn load(&self, path: &Path) -> ManifestResult<RollbackManifest> {
        let bytes = self.fs.read(path).map_err(|e| {
            if e.is_not_found() {
                ManifestError::NotFound(path.to_path_buf())
            } else {
                ManifestError::Io(e.to_string())
            }
        })?;
        let content = String::from_utf8(bytes).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    fn save(&self, manifest: &RollbackManifest, path: &Path) -> ManifestResult<()> {
        let content = Self::to_toml(manifest)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ManifestError::Io(e.to_string()))?;
        }
        self.fs
            .write(path, content.as_bytes())
            .map_err(|e| ManifestError::Io(e.to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    fn delete(&self, path: &Path) -> ManifestResult<()> {
        if self.fs.exists(path) {
            self.fs
                .remove_file(path)
                .map_err(|e| ManifestError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
