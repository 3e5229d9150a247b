//! Deployment Plan Sources
//!
//! Turn caller input into `DeploymentItem`s. The deployer never looks at
//! where items came from:
//! - `toml_plan` - a `[[file]]` list with inline content or source files
//! - `staging_dir` - every regular file below a directory

mod staging_dir;
mod toml_plan;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::DeploymentItem;

pub use staging_dir::load_staging_dir;
pub use toml_plan::{load_plan_file, parse_plan};

/// Errors while building the item list
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid plan file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("plan entry #{index} ('{entry_path}'): {message}")]
    InvalidEntry {
        index: usize,
        entry_path: String,
        message: String,
    },

    #[error("staging directory not found: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to walk staging directory: {0}")]
    Walk(String),
}

/// Where deployment items come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    File(PathBuf),
    StagingDir(PathBuf),
}

impl PlanSource {
    pub fn load(&self) -> Result<Vec<DeploymentItem>, PlanError> {
        match self {
            PlanSource::File(path) => load_plan_file(path),
            PlanSource::StagingDir(dir) => load_staging_dir(dir),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PlanSource::File(path) | PlanSource::StagingDir(path) => path,
        }
    }
}
