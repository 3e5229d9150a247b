//! Show command handler

use std::path::Path;

use anyhow::Result;

use safedeploy::domain::ports::ManifestRepository;
use safedeploy::error::SafedeployError;
use safedeploy::infrastructure::TomlManifestRepository;
use safedeploy::presentation::output::{render_manifest, OutputFormat};

use super::{load_config, manifest_path, EXIT_OK};

pub fn cmd_show(manifest: Option<&Path>, config_path: Option<&Path>, json: bool) -> Result<i32> {
    let config = load_config(config_path)?;
    let path = manifest_path(manifest, &config);

    let manifest = TomlManifestRepository::new()
        .load(&path)
        .map_err(SafedeployError::from)?;

    render_manifest(
        &mut std::io::stdout(),
        OutputFormat::from_json_flag(json),
        &manifest,
        &path,
    )?;

    Ok(EXIT_OK)
}
