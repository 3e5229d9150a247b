//! Configuration module for safedeploy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SAFEDEPLOY_*)
//! 3. Project config (./safedeploy.toml)
//! 4. User config (<config dir>/safedeploy/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{closest, levenshtein, parse_policy_override};
pub use loader::{
    apply_env_overrides, load_or_default, load_with_warnings, with_env_overrides, ConfigWarning,
    PROJECT_CONFIG_FILE,
};
pub use types::{BackupConfig, Config, ConfigError, ManifestConfig, DEFAULT_MANIFEST_FILE};
