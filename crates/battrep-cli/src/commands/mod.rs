//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::path::Path;

/// Read a saved report, dropping a leading byte order mark.
pub fn read_report(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Whether a path looks like a saved report.
pub fn is_report_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "html" | "htm")
}
