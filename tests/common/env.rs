//! Test environment for running the safedeploy binary in isolation.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a safedeploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout lines parsed as JSON values
    #[allow(dead_code)]
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({}): {}", e, l))
            })
            .collect()
    }
}

/// Isolated test environment.
///
/// Layout inside the working directory:
/// - `site/` - deployment root
/// - `plan.toml` - written by `write_plan`
/// - `safedeploy-rollback.toml` - default manifest location
pub struct TestEnv {
    pub work_dir: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create work dir");
        let home_dir = TempDir::new().expect("Failed to create home dir");
        std::fs::create_dir(work_dir.path().join("site")).expect("Failed to create root");

        Self {
            work_dir,
            home_dir,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_safedeploy")),
        }
    }

    /// Deployment root as the binary will record it
    pub fn root(&self) -> PathBuf {
        self.work_dir
            .path()
            .join("site")
            .canonicalize()
            .expect("root exists")
    }

    pub fn root_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Default manifest location (relative to the working directory)
    pub fn manifest_path(&self) -> PathBuf {
        self.work_path("safedeploy-rollback.toml")
    }

    pub fn write_root_file(&self, relative: &str, content: &str) {
        write_file(&self.root_path(relative), content);
    }

    pub fn write_work_file(&self, relative: &str, content: &str) {
        write_file(&self.work_path(relative), content);
    }

    pub fn read_root_file(&self, relative: &str) -> String {
        let path = self.root_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Write `plan.toml` with inline content entries
    pub fn write_plan(&self, entries: &[(&str, &str)]) -> PathBuf {
        let mut plan = String::new();
        for (path, content) in entries {
            plan.push_str(&format!(
                "[[file]]\npath = {}\ncontent = {}\n\n",
                toml::Value::String(path.to_string()),
                toml::Value::String(content.to_string())
            ));
        }
        let plan_path = self.work_path("plan.toml");
        write_file(&plan_path, &plan);
        plan_path
    }

    /// `apply --root site --plan plan.toml` plus extra args
    pub fn apply_plan(&self, extra: &[&str]) -> TestResult {
        let mut args = vec!["apply", "--root", "site", "--plan", "plan.toml"];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("SAFEDEPLOY_BACKUP_SUFFIX")
            .env_remove("SAFEDEPLOY_BACKUP_POLICY")
            .env_remove("SAFEDEPLOY_BACKUP_VERIFY")
            .env_remove("SAFEDEPLOY_MANIFEST");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute safedeploy");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
