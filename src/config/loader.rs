//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::env_validator::{closest, parse_policy_override};
use super::types::{Config, ConfigError};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "safedeploy.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
///
/// A config file that exists but cannot be parsed is an error; silently
/// falling back would change where backups and manifests go.
pub fn load_or_default(
    working_dir: &Path,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let project_config = working_dir.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return load_with_warnings(&project_config);
    }

    if let Some(user_config_dir) = dirs::config_dir() {
        let user_config = user_config_dir.join("safedeploy/config.toml");
        if user_config.is_file() {
            return load_with_warnings(&user_config);
        }
    }

    Ok((Config::default(), Vec::new()))
}

/// Apply environment variable overrides (SAFEDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |name| std::env::var(name).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary variable lookup (for testing)
pub fn apply_env_overrides<F, W>(mut config: Config, lookup: F, warnings: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if let Some(suffix) = lookup("SAFEDEPLOY_BACKUP_SUFFIX") {
        config.backup.suffix = suffix;
    }

    if let Some(policy) = lookup("SAFEDEPLOY_BACKUP_POLICY") {
        config.backup.policy = parse_policy_override(&policy, config.backup.policy, warnings);
    }

    if let Some(val) = lookup("SAFEDEPLOY_BACKUP_VERIFY") {
        config.backup.verify = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(path) = lookup("SAFEDEPLOY_MANIFEST") {
        if !path.is_empty() {
            config.manifest.path = PathBuf::from(path);
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["backup", "suffix", "policy", "verify", "manifest", "path"];
    closest(unknown, CANDIDATES).map(str::to_string)
}
