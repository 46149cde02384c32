//! Battery report parser combining the section extractors.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, SectionAnchors};
use crate::models::report::{BatteryInfo, BatteryReport, Section, TimeSeries};

use super::battery::extract_battery_info;
use super::capacity::extract_capacity_history;
use super::rules::MAX_PLAUSIBLE_ACTIVE_SECS;
use super::sections::locate_section;
use super::usage::{UsageAnomaly, UsageExtractor, UsageHistory};
use super::Result;

/// Result of report extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted report data.
    pub report: BatteryReport,
    /// Usage rows dropped for implausible active times.
    pub anomalies: Vec<UsageAnomaly>,
    /// Usage rows without an active time.
    pub skipped_usage_rows: usize,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for report parsing.
pub trait ReportParser {
    /// Parse a whole report document.
    fn parse(&self, document: &str) -> Result<ExtractionResult>;
}

/// Parser for battery reports.
///
/// Each section is located and extracted independently, so the per-section
/// methods can be called on their own.
#[derive(Debug, Clone)]
pub struct BatteryReportParser {
    /// Phrases delimiting the sections.
    anchors: SectionAnchors,
    /// Anomaly threshold for usage rows, in seconds.
    max_active_secs: u64,
}

impl BatteryReportParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            anchors: SectionAnchors::default(),
            max_active_secs: MAX_PLAUSIBLE_ACTIVE_SECS,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_anchors(config.anchors.clone())
            .with_max_active_secs(config.max_active_secs)
    }

    /// Set section anchors.
    pub fn with_anchors(mut self, anchors: SectionAnchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Set the usage anomaly threshold in seconds.
    pub fn with_max_active_secs(mut self, secs: u64) -> Self {
        self.max_active_secs = secs;
        self
    }

    fn section<'a>(&self, document: &'a str, section: Section) -> Result<&'a str> {
        locate_section(document, section, &self.anchors)
            .map_err(|e| ExtractionError::from(e).in_section(section))
    }

    /// Extract installed batteries.
    pub fn battery_info(&self, document: &str) -> Result<BatteryInfo> {
        extract_battery_info(self.section(document, Section::BatteryInfo)?)
    }

    /// Extract the capacity history series.
    pub fn capacity_history(&self, document: &str) -> Result<TimeSeries<u64>> {
        extract_capacity_history(self.section(document, Section::CapacityHistory)?)
    }

    /// Extract the cumulative usage series.
    pub fn usage_history(&self, document: &str) -> Result<UsageHistory> {
        UsageExtractor::new()
            .with_max_active_secs(self.max_active_secs)
            .extract(self.section(document, Section::UsageHistory)?)
    }
}

impl Default for BatteryReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for BatteryReportParser {
    fn parse(&self, document: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing battery report from {} characters of text", document.len());

        let battery = self.battery_info(document)?;
        if battery.battery_count() == 0 {
            warnings.push("No installed batteries listed".to_string());
        }

        let capacity_history = self.capacity_history(document)?;
        if capacity_history.is_empty() {
            warnings.push("Capacity history is empty".to_string());
        } else if !capacity_history.is_chronological() {
            warnings.push("Capacity history is not in chronological order".to_string());
        }

        let usage = self.usage_history(document)?;
        if usage.series.is_empty() {
            warnings.push("Usage history is empty".to_string());
        } else if !usage.series.is_chronological() {
            warnings.push("Usage history is not in chronological order".to_string());
        }
        if !usage.anomalies.is_empty() {
            warnings.push(format!(
                "Dropped {} usage rows with active time above {}s",
                usage.anomalies.len(),
                self.max_active_secs
            ));
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        debug!(
            "Extracted {} batteries, {} capacity points, {} usage points in {:?}",
            battery.battery_count(),
            capacity_history.len(),
            usage.series.len(),
            start.elapsed()
        );

        Ok(ExtractionResult {
            report: BatteryReport {
                battery,
                capacity_history,
                usage_history: usage.series,
            },
            anomalies: usage.anomalies,
            skipped_usage_rows: usage.skipped_rows,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
