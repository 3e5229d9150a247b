//! Property tests for apply -> rollback manifest -> undo.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use safedeploy::application::{ApplyOptions, ApplyUseCase, RollbackWriter, UndoUseCase};
use safedeploy::domain::ports::ManifestRepository;
use safedeploy::infrastructure::{LocalFs, TomlManifestRepository};
use safedeploy::DeploymentItem;

/// Relative path -> file content (None for directories)
type Snapshot = BTreeMap<PathBuf, Option<Vec<u8>>>;

fn snapshot(root: &Path) -> Snapshot {
    fn walk(root: &Path, dir: &Path, out: &mut Snapshot) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let relative = path.strip_prefix(root).unwrap().to_path_buf();
            if path.is_dir() {
                out.insert(relative, None);
                walk(root, &path, out);
            } else {
                out.insert(relative, Some(fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = Snapshot::new();
    walk(root, root, &mut out);
    out
}

fn rel_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-c]{1,2}(/[a-c]{1,2}){0,2}").unwrap()
}

fn content() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..64)
}

/// Write files, skipping any that collide with an earlier file or directory
fn seed(root: &Path, files: &[(String, Vec<u8>)]) {
    for (path, bytes) in files {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            if fs::create_dir_all(parent).is_err() {
                continue;
            }
        }
        if target.is_dir() {
            continue;
        }
        let _ = fs::write(&target, bytes);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: undo(load(write(apply(items)))) restores the tree byte-for-byte.
    #[test]
    fn property_apply_then_undo_restores_tree(
        existing in proptest::collection::vec((rel_path(), content()), 0..6),
        stray_backups in proptest::collection::vec((rel_path(), content()), 0..3),
        items in proptest::collection::vec((rel_path(), content()), 1..8),
    ) {
        let root_dir = TempDir::new().unwrap();
        let state_dir = TempDir::new().unwrap();
        let root = root_dir.path().canonicalize().unwrap();
        let manifest_path = state_dir.path().join("rollback.toml");

        seed(&root, &existing);
        // Files that merely look like backups belong to the project.
        let stray: Vec<(String, Vec<u8>)> = stray_backups
            .into_iter()
            .map(|(p, c)| (format!("{}.bak", p), c))
            .collect();
        seed(&root, &stray);
        let before = snapshot(&root);

        let items: Vec<DeploymentItem> = items
            .into_iter()
            .map(|(p, c)| DeploymentItem::new(p, c))
            .collect();
        let result = ApplyUseCase::new(LocalFs::new(), ApplyOptions::new()).execute(&items, &root);

        let writer = RollbackWriter::new(TomlManifestRepository::new());
        let written = writer.write_result(&result, &manifest_path, false).unwrap();

        // Every overwritten file has a byte-identical backup.
        for (original, backup) in written.backups_to_restore() {
            let relative = original.strip_prefix(&root).unwrap();
            let expected = before.get(relative).cloned().flatten();
            prop_assert_eq!(fs::read(backup).ok(), expected);
        }

        let loaded = TomlManifestRepository::new().load(&manifest_path).unwrap();
        prop_assert_eq!(&loaded, &written);

        let undo = UndoUseCase::new(LocalFs::new()).execute(&loaded);
        prop_assert!(undo.is_success());
        prop_assert_eq!(snapshot(&root), before);

        let again = UndoUseCase::new(LocalFs::new()).execute(&loaded);
        prop_assert!(again.is_success());
        prop_assert_eq!(again.skipped_count(), again.entries.len());
    }
}
