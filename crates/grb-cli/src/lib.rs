//! Helpers shared by the GRB command line tools.

use anyhow::{Context, Result};
use geojson::FeatureCollection;
use grb_core::{RunParams, RunRequest};
use std::fs;
use std::path::Path;

/// Read a flight geography and its parameters into a run request.
pub fn load_request(fg_path: &Path, params_path: &Path) -> Result<RunRequest> {
    let fg = fs::read_to_string(fg_path)
        .with_context(|| format!("reading flight geography {}", fg_path.display()))?;
    let fg: FeatureCollection = serde_json::from_str(&fg)
        .with_context(|| format!("parsing GeoJSON {}", fg_path.display()))?;

    let params = fs::read_to_string(params_path)
        .with_context(|| format!("reading parameters {}", params_path.display()))?;
    let params: RunParams = serde_json::from_str(&params)
        .with_context(|| format!("parsing parameters {}", params_path.display()))?;

    Ok(RunRequest { fg, params })
}
