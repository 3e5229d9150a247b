//! Assertion helpers with descriptive failure messages.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Assert a file below the deployment root has exactly `content`.
#[macro_export]
macro_rules! assert_file_content {
    ($env:expr, $path:expr, $content:expr) => {
        let full_path = $env.root_path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files(&$env.root()).join("\n  ")
        );
        assert_eq!($env.read_root_file($path), $content, "content of '{}'", $path);
    };
}

/// Assert nothing exists at a path below the deployment root.
#[macro_export]
macro_rules! assert_absent {
    ($env:expr, $path:expr) => {
        assert!(
            !$env.root_path($path).exists(),
            "Expected '{}' to NOT exist, but it does.",
            $path
        );
    };
}
