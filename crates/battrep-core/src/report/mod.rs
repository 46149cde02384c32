//! Battery report extraction module.

pub mod battery;
pub mod capacity;
mod parser;
pub mod rules;
pub mod schema;
pub mod sections;
pub mod usage;

pub use battery::extract_battery_info;
pub use capacity::extract_capacity_history;
pub use parser::{BatteryReportParser, ExtractionResult, ReportParser};
pub use sections::{split_sections, ReportSections};
pub use usage::{extract_usage_history, UsageAnomaly, UsageExtractor, UsageHistory};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
