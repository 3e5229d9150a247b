//! `safedeploy apply` end-to-end tests.

mod common;

use common::TestEnv;

#[test]
fn apply_creates_files_and_writes_manifest() {
    let env = TestEnv::new();
    env.write_plan(&[("a/b.txt", "hello\n")]);

    let result = env.apply_plan(&[]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "a/b.txt", "hello\n");
    assert!(result.stdout.contains("[CREATE]"), "stdout: {}", result.stdout);

    let manifest = std::fs::read_to_string(env.manifest_path()).unwrap();
    let value: toml::Value = toml::from_str(&manifest).unwrap();
    assert_eq!(value["version"].as_integer(), Some(1));
    assert_eq!(
        value["files_to_remove"][0].as_str(),
        Some(env.root_path("a/b.txt").to_str().unwrap())
    );
    assert_eq!(
        value["dirs_created"][0].as_str(),
        Some(env.root_path("a").to_str().unwrap())
    );
}

#[test]
fn apply_backs_up_existing_file() {
    let env = TestEnv::new();
    env.write_root_file("index.html", "<old/>");
    env.write_plan(&[("index.html", "<new/>")]);

    let result = env.apply_plan(&[]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "index.html", "<new/>");
    assert_file_content!(env, "index.html.bak", "<old/>");
    assert!(result.stdout.contains("[BACKUP]"));
}

#[test]
fn item_failure_exits_1_and_keeps_successes() {
    let env = TestEnv::new();
    env.write_plan(&[("../escape.txt", "x"), ("ok.txt", "fine")]);

    let result = env.apply_plan(&[]);

    assert_eq!(result.exit_code, 1, "stdout: {}", result.stdout);
    assert_file_content!(env, "ok.txt", "fine");
    assert!(!env.work_path("escape.txt").exists());
    assert!(result.stdout.contains("1 item(s) failed"), "stdout: {}", result.stdout);
    assert!(env.manifest_path().exists());
}

#[test]
fn dry_run_changes_nothing() {
    let env = TestEnv::new();
    env.write_root_file("x.txt", "old");
    env.write_plan(&[("x.txt", "new"), ("d/y.txt", "y")]);

    let result = env.apply_plan(&["--dry-run"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("[CREATE]"));
    assert!(result.stdout.contains("[REPLACE]"));
    assert_file_content!(env, "x.txt", "old");
    assert_absent!(env, "d");
    assert_absent!(env, "x.txt.bak");
    assert!(!env.manifest_path().exists());
}

#[test]
fn existing_manifest_requires_force() {
    let env = TestEnv::new();
    env.write_plan(&[("a.txt", "1")]);
    assert!(env.apply_plan(&[]).is_success());

    env.write_plan(&[("b.txt", "2")]);
    let refused = env.apply_plan(&[]);

    assert_eq!(refused.exit_code, 2);
    assert!(refused.stderr.contains("--force"), "stderr: {}", refused.stderr);
    assert_absent!(env, "b.txt");

    let forced = env.apply_plan(&["--force"]);
    assert!(forced.is_success(), "stderr: {}", forced.stderr);
    assert_file_content!(env, "b.txt", "2");
}

#[test]
fn foreign_backup_file_blocks_item() {
    let env = TestEnv::new();
    env.write_root_file("a.txt", "current");
    env.write_root_file("a.txt.bak", "unrelated project file");
    env.write_plan(&[("a.txt", "new"), ("b.txt", "b")]);

    let result = env.apply_plan(&[]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("already exists"), "stdout: {}", result.stdout);
    assert_file_content!(env, "a.txt", "current");
    assert_file_content!(env, "a.txt.bak", "unrelated project file");

    assert!(env.run(&["undo"]).is_success());
    assert_file_content!(env, "a.txt", "current");
    assert_file_content!(env, "a.txt.bak", "unrelated project file");
    assert_absent!(env, "b.txt");
}

#[test]
fn forced_reapply_reuses_recorded_backup() {
    let env = TestEnv::new();
    env.write_root_file("a.txt", "original");
    env.write_plan(&[("a.txt", "v1")]);
    assert!(env.apply_plan(&[]).is_success());

    env.write_plan(&[("a.txt", "v2")]);
    let result = env.apply_plan(&["--force"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "a.txt", "v2");
    assert_file_content!(env, "a.txt.bak", "original");

    assert!(env.run(&["undo"]).is_success());
    assert_file_content!(env, "a.txt", "original");
    assert_absent!(env, "a.txt.bak");
}

#[test]
fn staging_directory_is_deployed_with_ignores() {
    let env = TestEnv::new();
    env.write_work_file("staging/app/page.tsx", "page");
    env.write_work_file("staging/app/debug.log", "noise");
    env.write_work_file("staging/.safedeployignore", "*.log\n");

    let result = env.run(&["apply", "--root", "site", "--from-dir", "staging"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "app/page.tsx", "page");
    assert_absent!(env, "app/debug.log");
    assert_absent!(env, ".safedeployignore");
}

#[test]
fn plan_entries_can_reference_source_files() {
    let env = TestEnv::new();
    env.write_work_file("generated/web-vitals.tsx", "export {}\n");
    env.write_work_file(
        "plan.toml",
        "[[file]]\npath = \"components/web-vitals.tsx\"\nsource = \"generated/web-vitals.tsx\"\n",
    );

    let result = env.apply_plan(&[]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "components/web-vitals.tsx", "export {}\n");
}

#[test]
fn json_mode_emits_only_json() {
    let env = TestEnv::new();
    env.write_root_file("x.txt", "old");
    env.write_plan(&[("x.txt", "new"), ("y.txt", "y")]);

    let result = env.apply_plan(&["--json"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    let lines = result.json_lines();
    assert_eq!(lines.first().unwrap()["event"], "start");
    let summary = lines.last().unwrap();
    assert_eq!(summary["type"], "apply_summary");
    assert_eq!(summary["created"], 1);
    assert_eq!(summary["replaced"], 1);
}

#[test]
fn missing_root_is_fatal() {
    let env = TestEnv::new();
    env.write_plan(&[("a.txt", "1")]);

    let result = env.run(&["apply", "--root", "nowhere", "--plan", "plan.toml"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("not a directory"), "stderr: {}", result.stderr);
}

#[test]
fn unreadable_plan_is_fatal() {
    let env = TestEnv::new();
    env.write_work_file("plan.toml", "[[file]]\npath = \"a.txt\"\n");

    let result = env.apply_plan(&[]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("missing 'content' or 'source'"), "stderr: {}", result.stderr);
    assert_absent!(env, "a.txt");
}

#[test]
fn project_config_sets_backup_suffix() {
    let env = TestEnv::new();
    env.write_work_file("safedeploy.toml", "[backup]\nsuffix = \".orig\"\n");
    env.write_root_file("a.txt", "old");
    env.write_plan(&[("a.txt", "new")]);

    let result = env.apply_plan(&[]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "a.txt.orig", "old");
    assert_absent!(env, "a.txt.bak");
}

#[test]
fn cli_suffix_wins_over_config() {
    let env = TestEnv::new();
    env.write_work_file("safedeploy.toml", "[backup]\nsuffix = \".orig\"\n");
    env.write_root_file("a.txt", "old");
    env.write_plan(&[("a.txt", "new")]);

    let result = env.apply_plan(&["--backup-suffix", ".prev"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert_file_content!(env, "a.txt.prev", "old");
}

#[test]
fn invalid_suffix_is_fatal() {
    let env = TestEnv::new();
    env.write_plan(&[("a.txt", "new")]);

    let result = env.apply_plan(&["--backup-suffix", "bak"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("must start with '.'"), "stderr: {}", result.stderr);
}

#[test]
fn env_policy_fail_refuses_existing_backup() {
    let env = TestEnv::new();
    env.write_root_file("a.txt", "current");
    env.write_root_file("a.txt.bak", "older");
    env.write_plan(&[("a.txt", "new")]);

    let result = env.run_with_env(
        &["apply", "--root", "site", "--plan", "plan.toml"],
        &[("SAFEDEPLOY_BACKUP_POLICY", "fail")],
    );

    assert_eq!(result.exit_code, 1);
    assert_file_content!(env, "a.txt", "current");
    assert_file_content!(env, "a.txt.bak", "older");
}

#[test]
fn unknown_config_key_warns() {
    let env = TestEnv::new();
    env.write_work_file("safedeploy.toml", "[backup]\npolcy = \"keep\"\n");
    env.write_plan(&[("a.txt", "1")]);

    let result = env.apply_plan(&[]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("did you mean 'policy'?"), "stderr: {}", result.stderr);
}
