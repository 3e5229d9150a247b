//! Command handlers
//!
//! Each handler returns the process exit code for a run that got far enough
//! to do per-item work. Setup failures come back as errors and exit with
//! `EXIT_FATAL`.

pub mod apply;
pub mod show;
pub mod undo;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use safedeploy::config::{self, Config};
use safedeploy::infrastructure::expand_home;

/// Every item or entry succeeded
pub const EXIT_OK: i32 = 0;
/// The run finished but some items or entries failed
pub const EXIT_PARTIAL: i32 = 1;
/// Nothing was attempted (bad input, config or manifest)
pub const EXIT_FATAL: i32 = 2;

/// Resolve configuration: explicit file or project/user file, then env
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (config, warnings) = match explicit {
        Some(path) => Config::load_with_warnings(&expand_home(path))?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            config::load_or_default(&cwd)?
        }
    };

    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    Ok(config::with_env_overrides(config))
}

/// Manifest path from the command line, falling back to config
pub fn manifest_path(flag: Option<&Path>, config: &Config) -> PathBuf {
    expand_home(flag.unwrap_or(config.manifest.path.as_path()))
}
