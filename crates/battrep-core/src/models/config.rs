//! Configuration structures for report extraction.

use serde::{Deserialize, Serialize};

use crate::report::rules::MAX_PLAUSIBLE_ACTIVE_SECS;

/// Main configuration for battrep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattrepConfig {
    /// Report extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output formatting configuration.
    pub output: OutputConfig,
}

/// Report extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Usage rows with a longer active time than this (in seconds) are
    /// dropped as anomalies.
    pub max_active_secs: u64,

    /// Phrases delimiting the report sections.
    pub anchors: SectionAnchors,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_active_secs: MAX_PLAUSIBLE_ACTIVE_SECS,
            anchors: SectionAnchors::default(),
        }
    }
}

/// Anchor phrases bounding each section.
///
/// A section is the text after its start anchor and before its end anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionAnchors {
    pub battery_info_start: String,
    pub battery_info_end: String,
    pub usage_history_start: String,
    pub usage_history_end: String,
    pub capacity_history_start: String,
    pub capacity_history_end: String,
}

impl Default for SectionAnchors {
    fn default() -> Self {
        Self {
            battery_info_start: "Installed batteries".to_string(),
            battery_info_end: "Recent usage".to_string(),
            usage_history_start: "Usage history".to_string(),
            usage_history_end: "Battery capacity history".to_string(),
            capacity_history_start: "Battery capacity history".to_string(),
            capacity_history_end: "Battery life estimates".to_string(),
        }
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// `strftime` format for dates in CSV and text output.
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl BattrepConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
