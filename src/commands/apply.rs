//! Apply command handler
//!
//! Loads the deployment items, runs the deployer and writes the rollback
//! manifest. The manifest destination is checked before anything is
//! touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use safedeploy::application::ApplyOptions;
use safedeploy::domain::ports::ManifestRepository;
use safedeploy::error::SafedeployError;
use safedeploy::infrastructure::{expand_home, PlanSource, TomlManifestRepository};
use safedeploy::presentation::factory;
use safedeploy::presentation::output::{render_apply_summary, render_preview, OutputFormat};
use safedeploy::presentation::ApplyArgs;

use super::{load_config, manifest_path, EXIT_OK, EXIT_PARTIAL};

pub fn cmd_apply(args: &ApplyArgs, config_path: Option<&Path>, json: bool) -> Result<i32> {
    let mut config = load_config(config_path)?;
    if let Some(suffix) = &args.backup_suffix {
        config.backup.suffix = suffix.clone();
    }
    if let Some(policy) = args.backup_policy {
        config.backup.policy = policy;
    }
    if args.no_verify {
        config.backup.verify = false;
    }

    let root = resolve_root(&args.root)?;
    let destination = manifest_path(args.manifest.as_deref(), &config);
    let options = ApplyOptions::from_config(&config)
        .map_err(SafedeployError::from)?
        .with_known_backups(recorded_backups(&destination));

    let source = match (&args.plan, &args.from_dir) {
        (Some(plan), _) => PlanSource::File(expand_home(plan)),
        (None, Some(dir)) => PlanSource::StagingDir(expand_home(dir)),
        (None, None) => anyhow::bail!("either --plan or --from-dir is required"),
    };
    let items = source.load().map_err(SafedeployError::from)?;
    tracing::debug!(source = %source.path().display(), items = items.len(), "deployment items loaded");

    let format = OutputFormat::from_json_flag(json);
    let use_case = factory::create_apply_use_case(options);

    if args.dry_run {
        let preview = use_case.preview(&items, &root);
        render_preview(&mut std::io::stdout(), format, &root, &preview)?;
        return Ok(if preview.is_success() { EXIT_OK } else { EXIT_PARTIAL });
    }

    let writer = factory::create_rollback_writer();
    writer
        .check_destination(&destination, args.force)
        .map_err(SafedeployError::from)?;

    let sink = factory::create_event_sink(json);
    let result = use_case.execute_with_events(&items, &root, sink.as_ref());

    let written = if result.is_noop() {
        None
    } else {
        writer
            .write_result(&result, &destination, args.force)
            .map_err(SafedeployError::from)
            .with_context(|| {
                format!(
                    "{} item(s) were applied but the rollback manifest could not be written",
                    result.actions.len()
                )
            })?;
        Some(destination.as_path())
    };

    render_apply_summary(&mut std::io::stdout(), format, &result, written)?;

    Ok(if result.is_success() { EXIT_OK } else { EXIT_PARTIAL })
}

/// Backup files named by the manifest currently at `destination`
///
/// These are the only existing backups apply may reuse. An unreadable
/// manifest contributes nothing, so its backups are treated as foreign.
fn recorded_backups(destination: &Path) -> Vec<PathBuf> {
    let repo = TomlManifestRepository::new();
    if !repo.exists(destination) {
        return Vec::new();
    }
    match repo.load(destination) {
        Ok(manifest) => manifest
            .backups_to_restore()
            .map(|(_, backup)| backup.to_path_buf())
            .collect(),
        Err(e) => {
            tracing::warn!(manifest = %destination.display(), "ignoring unreadable manifest: {}", e);
            Vec::new()
        }
    }
}

/// Absolute, existing deployment root
fn resolve_root(root: &Path) -> Result<PathBuf> {
    let root = expand_home(root);
    if !root.is_dir() {
        return Err(SafedeployError::RootNotDirectory { path: root }.into());
    }
    let absolute = root
        .canonicalize()
        .map_err(SafedeployError::from)
        .with_context(|| format!("cannot resolve deployment root {}", root.display()))?;
    if absolute.to_str().is_none() {
        return Err(SafedeployError::RootNotUtf8 { path: absolute }.into());
    }
    Ok(absolute)
}
