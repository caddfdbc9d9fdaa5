//! Import parameters from a JSON file and command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use course_mesh::ImportParams;
use tracing::debug;

use crate::ImportArgs;

/// Read an `ImportParams` JSON file. Missing fields keep their defaults.
pub fn load(path: &Path) -> Result<ImportParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Defaults, then the config file, then flags.
pub fn resolve(args: &ImportArgs) -> Result<ImportParams> {
    let mut params = match &args.config {
        Some(path) => load(path)?,
        None => ImportParams::default(),
    };
    if let Some(axis) = args.axis {
        params = params.with_axis(axis.into());
    }
    if let Some(radius) = args.blend_radius {
        params = params.with_blend_radius(radius);
    }
    params
        .blend_params()
        .validate()
        .context("Invalid blend radius")?;
    debug!(?params, "Resolved import parameters");
    Ok(params)
}
