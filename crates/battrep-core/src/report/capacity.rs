//! Battery capacity history extraction.

use tracing::debug;

use crate::error::{ExtractionError, ParseError};
use crate::models::report::{Section, TimeSeries};
use crate::table::{extract_table, Row};

use super::rules::{digits_to_integer, parse_date};
use super::schema::capacity::{CAPACITY_COLUMN, DATE_COLUMN, HEADER_ROWS};
use super::Result;

/// Extract full charge capacity (mWh) per period.
///
/// Every data row becomes one point, in document order.
pub fn extract_capacity_history(section: &str) -> Result<TimeSeries<u64>> {
    let table = extract_table(section)
        .map_err(|e| ExtractionError::from(e).in_section(Section::CapacityHistory))?;

    let mut series = TimeSeries::new();
    for (index, row) in table.iter().enumerate().skip(HEADER_ROWS) {
        let (date, capacity) = parse_row(row, index)
            .map_err(|e| e.in_section(Section::CapacityHistory))?;
        series.push(date, capacity);
    }

    debug!("Extracted {} capacity history points", series.len());

    Ok(series)
}

fn parse_row(row: &Row, index: usize) -> Result<(chrono::NaiveDate, u64)> {
    let cell = |column: usize| {
        row.cell(column)
            .map(|cell| cell.as_str())
            .ok_or_else(|| ExtractionError::new(ParseError::MissingCell).at_cell(index, column))
    };

    let date = parse_date(cell(DATE_COLUMN)?)
        .map_err(|e| ExtractionError::new(e).at_cell(index, DATE_COLUMN))?;
    let capacity = digits_to_integer(cell(CAPACITY_COLUMN)?)
        .map_err(|e| ExtractionError::new(e).at_cell(index, CAPACITY_COLUMN))?;

    Ok((date, capacity))
}
