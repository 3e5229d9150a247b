//! Undo command handler

use std::path::Path;

use anyhow::{Context, Result};

use safedeploy::domain::ports::ManifestRepository;
use safedeploy::error::SafedeployError;
use safedeploy::infrastructure::TomlManifestRepository;
use safedeploy::presentation::factory;
use safedeploy::presentation::output::{render_undo_summary, OutputFormat};

use super::{load_config, manifest_path, EXIT_OK, EXIT_PARTIAL};

pub fn cmd_undo(
    manifest: Option<&Path>,
    remove_manifest: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let path = manifest_path(manifest, &config);

    let repo = TomlManifestRepository::new();
    let manifest = repo.load(&path).map_err(SafedeployError::from)?;

    if !manifest.root().is_dir() {
        tracing::warn!(root = %manifest.root().display(), "deployment root no longer exists");
    }

    let sink = factory::create_event_sink(json);
    let result = factory::create_undo_use_case().execute_with_events(&manifest, sink.as_ref());

    render_undo_summary(&mut std::io::stdout(), OutputFormat::from_json_flag(json), &result)?;

    if !result.is_success() {
        return Ok(EXIT_PARTIAL);
    }

    if remove_manifest {
        repo.delete(&path)
            .map_err(SafedeployError::from)
            .with_context(|| format!("undo succeeded but {} was not removed", path.display()))?;
        tracing::info!(manifest = %path.display(), "rollback manifest removed");
    }

    Ok(EXIT_OK)
}
