//! JSON rendering for analysis reports.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Report;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a report to JSON.
pub fn to_json(report: &Report, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write a report to a file, creating parent directories as needed.
pub fn write_report<P: AsRef<Path>>(report: &Report, path: P, format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(report, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;

    log::info!("Report written to {}", path.display());
    Ok(())
}
