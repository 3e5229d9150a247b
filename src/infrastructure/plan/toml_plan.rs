//! TOML plan file
//!
//! ```toml
//! [[file]]
//! path = "app/api/indexnow/route.ts"
//! content = "export async function POST() {}\n"
//!
//! [[file]]
//! path = "components/analytics/web-vitals.tsx"
//! source = "generated/web-vitals.tsx"
//! ```
//!
//! `source` is resolved relative to the plan file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::PlanError;
use crate::domain::entities::DeploymentItem;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPlan {
    #[serde(default, rename = "file")]
    files: Vec<TomlPlanEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPlanEntry {
    path: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    source: Option<PathBuf>,
}

/// Load a plan file from disk
pub fn load_plan_file(path: &Path) -> Result<Vec<DeploymentItem>, PlanError> {
    let content = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or(Path::new("."));
    parse_plan(&content, path, base)
}

/// Parse plan text; `source` entries are read relative to `base`
pub fn parse_plan(
    content: &str,
    plan_path: &Path,
    base: &Path,
) -> Result<Vec<DeploymentItem>, PlanError> {
    let plan: TomlPlan = toml::from_str(content).map_err(|e| PlanError::Parse {
        path: plan_path.to_path_buf(),
        message: e.to_string(),
    })?;

    plan.files
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry_to_item(index, entry, base))
        .collect()
}

fn entry_to_item(
    index: usize,
    entry: TomlPlanEntry,
    base: &Path,
) -> Result<DeploymentItem, PlanError> {
    let invalid = |message: &str| PlanError::InvalidEntry {
        index,
        entry_path: entry.path.clone(),
        message: message.to_string(),
    };

    let bytes = match (&entry.content, &entry.source) {
        (Some(content), None) => content.clone().into_bytes(),
        (None, Some(source)) => {
            let source = base.join(source);
            std::fs::read(&source).map_err(|e| PlanError::Io { path: source, source: e })?
        }
        (Some(_), Some(_)) => return Err(invalid("set either 'content' or 'source', not both")),
        (None, None) => return Err(invalid("missing 'content' or 'source'")),
    };

    Ok(DeploymentItem::new(entry.path, bytes))
}
