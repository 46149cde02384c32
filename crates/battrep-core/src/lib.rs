//! Core library for battery report extraction.
//!
//! This crate provides:
//! - A minimal tokenizer for the report's loosely structured HTML tables
//! - Section location by anchor phrases
//! - Battery information, capacity history and usage history extraction
//! - Report data models (battery records, time series)

pub mod error;
pub mod models;
pub mod table;
pub mod report;

pub use error::{BattrepError, ExtractionError, ParseError, Result};
pub use models::config::{BattrepConfig, ExtractionConfig, SectionAnchors};
pub use models::report::{BatteryInfo, BatteryRecord, BatteryReport, Section, TimeSeries};
pub use table::{Cell, Row, Table, extract_row, extract_table};
pub use report::{BatteryReportParser, ExtractionResult, ReportParser, UsageAnomaly};
