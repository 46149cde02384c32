//! Usage history extraction with cumulative active hours.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ExtractionError, ParseError};
use crate::models::report::{Section, TimeSeries};
use crate::table::extract_table;

use super::rules::{parse_active_duration, parse_date, MAX_PLAUSIBLE_ACTIVE_SECS, SECS_PER_HOUR};
use super::schema::usage::{ACTIVE_COLUMN, DATE_COLUMN, HEADER_ROWS};
use super::Result;

/// A usage row dropped for an implausible active time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAnomaly {
    /// Row index within the usage table.
    pub row: usize,
    /// Raw period text of the row.
    pub period: String,
    /// Reported active time in seconds.
    pub active_secs: u64,
}

/// Usage history with the rows that did not contribute to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageHistory {
    /// Cumulative active hours on battery per period.
    pub series: TimeSeries<u64>,
    /// Rows dropped by the anomaly filter.
    pub anomalies: Vec<UsageAnomaly>,
    /// Rows without an active time.
    pub skipped_rows: usize,
}

/// Usage history extractor.
#[derive(Debug, Clone)]
pub struct UsageExtractor {
    /// Active times above this many seconds are anomalies.
    max_active_secs: u64,
}

impl UsageExtractor {
    pub fn new() -> Self {
        Self {
            max_active_secs: MAX_PLAUSIBLE_ACTIVE_SECS,
        }
    }

    /// Set the anomaly threshold in seconds.
    pub fn with_max_active_secs(mut self, secs: u64) -> Self {
        self.max_active_secs = secs;
        self
    }

    /// Extract cumulative active hours from the usage history section.
    ///
    /// The hour count is truncated at every point, so it tracks whole hours
    /// of the running total rather than a sum of truncated periods.
    pub fn extract(&self, section: &str) -> Result<UsageHistory> {
        let in_section = |e: ExtractionError| e.in_section(Section::UsageHistory);

        let table = extract_table(section).map_err(|e| in_section(e.into()))?;

        let mut history = UsageHistory::default();
        let mut cumulative_secs: u64 = 0;

        for (index, row) in table.iter().enumerate().skip(HEADER_ROWS) {
            let active = match row.cell(ACTIVE_COLUMN) {
                Some(cell) if cell.char_len() > 1 => cell.as_str(),
                _ => {
                    history.skipped_rows += 1;
                    continue;
                }
            };

            let active_secs = parse_active_duration(active)
                .map_err(|e| in_section(ExtractionError::new(e).at_cell(index, ACTIVE_COLUMN)))?;

            let date_cell = row.cell(DATE_COLUMN);
            let period = date_cell.map(|cell| cell.as_str()).unwrap_or_default();

            if active_secs > self.max_active_secs {
                warn!(
                    "Dropping usage row {} ({}): active time {}s exceeds {}s",
                    index, period, active_secs, self.max_active_secs
                );
                history.anomalies.push(UsageAnomaly {
                    row: index,
                    period: period.to_string(),
                    active_secs,
                });
                continue;
            }

            let date = date_cell
                .ok_or(ParseError::MissingCell)
                .and_then(|cell| parse_date(cell.as_str()))
                .map_err(|e| in_section(ExtractionError::new(e).at_cell(index, DATE_COLUMN)))?;

            cumulative_secs = cumulative_secs.saturating_add(active_secs);
            history.series.push(date, cumulative_secs / SECS_PER_HOUR);
        }

        debug!(
            "Extracted {} usage points ({} skipped, {} anomalies)",
            history.series.len(),
            history.skipped_rows,
            history.anomalies.len()
        );

        Ok(history)
    }
}

impl Default for UsageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract usage history with the default anomaly threshold.
pub fn extract_usage_history(section: &str) -> Result<UsageHistory> {
    UsageExtractor::new().extract(section)
}
