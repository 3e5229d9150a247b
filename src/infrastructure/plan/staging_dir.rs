//! Staging directory source
//!
//! Every regular file below the staging directory becomes an item keyed by
//! its path relative to that directory. A `.safedeployignore` file
//! (gitignore syntax) in the staging tree excludes matching paths; no other
//! ignore rules apply.

use std::path::Path;

use ignore::WalkBuilder;

use super::PlanError;
use crate::domain::entities::DeploymentItem;

/// Name of the per-directory exclusion file
pub const IGNORE_FILE_NAME: &str = ".safedeployignore";

/// Collect all files below `dir`, sorted by path
pub fn load_staging_dir(dir: &Path) -> Result<Vec<DeploymentItem>, PlanError> {
    if !dir.is_dir() {
        return Err(PlanError::NotADirectory(dir.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut items = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| PlanError::Walk(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if entry.file_name() == IGNORE_FILE_NAME {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .map_err(|e| PlanError::Walk(e.to_string()))?;
        let content = std::fs::read(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %relative.display(), bytes = content.len(), "staged file");
        items.push(DeploymentItem::new(relative, content));
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn collects_nested_files_in_order() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/api")).unwrap();
        std::fs::write(dir.path().join("app/api/route.ts"), "route").unwrap();
        std::fs::write(dir.path().join("README.md"), "readme").unwrap();
        std::fs::write(dir.path().join(".env.example"), "KEY=").unwrap();

        let items = load_staging_dir(dir.path()).unwrap();
        let paths: Vec<PathBuf> = items
            .iter()
            .map(|i| i.relative_path().to_path_buf())
            .collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from(".env.example"),
                PathBuf::from("README.md"),
                PathBuf::from("app/api/route.ts"),
            ]
        );
        assert_eq!(items[2].content(), b"route");
    }

    #[test]
    fn honours_ignore_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(IGNORE_FILE_NAME), "*.log\n").unwrap();
        std::fs::write(dir.path().join("keep.txt"), "k").unwrap();
        std::fs::write(dir.path().join("debug.log"), "d").unwrap();

        let items = load_staging_dir(dir.path()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].relative_path(), Path::new("keep.txt"));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_staging_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PlanError::NotADirectory(_)));
    }
}
