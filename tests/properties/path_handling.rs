//! Property tests for deployment path validation.

use std::path::{Component, Path};

use proptest::prelude::*;

use safedeploy::domain::value_objects::{BackupSuffix, SafePath};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validation never panics, and accepted paths resolve below the root.
    #[test]
    fn property_safe_path_stays_under_root(raw in "[a-z./\\\\]{0,24}") {
        let root = Path::new("/srv/site");
        if let Ok(safe) = SafePath::new(&raw) {
            let resolved = safe.resolve(root);
            prop_assert!(resolved.starts_with(root));
            prop_assert!(resolved != root);
            prop_assert!(!safe
                .as_path()
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir)));
        }
    }

    /// PROPERTY: A backup path is never itself a deployable, non-reserved path.
    #[test]
    fn property_backup_paths_are_reserved(name in "[a-z]{1,8}(\\.[a-z]{1,3})?") {
        let suffix = BackupSuffix::default();
        let target = Path::new("/srv/site").join(&name);
        let backup = suffix.backup_path(&target);

        prop_assert!(suffix.is_reserved(&backup));
        prop_assert!(!suffix.is_reserved(&target) || name.ends_with(".bak"));
        prop_assert_eq!(backup.parent(), target.parent());
    }
}
