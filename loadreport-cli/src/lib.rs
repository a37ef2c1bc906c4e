//! Collaborators around the analysis engine: JTL ingestion and report rendering.

use std::fs;
use std::path::Path;

use loadreport_common::{LoadReportError, Result};
use loadreport_engine::config::Thresholds;

pub mod ingest;
pub mod render;

/// Load thresholds from a JSON file, or the defaults when no file is given.
pub fn load_thresholds(path: Option<&Path>) -> Result<Thresholds> {
    let Some(path) = path else {
        return Ok(Thresholds::default());
    };
    let json = fs::read_to_string(path).map_err(|e| LoadReportError::ReadFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Thresholds::from_json_str(&json)
}
