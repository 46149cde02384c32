//! Error types for the battrep-core library.

use thiserror::Error;

use crate::models::report::Section;

/// Main error type for the battrep library.
#[derive(Error, Debug)]
pub enum BattrepError {
    /// Report extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Data-shape failures raised while reading report text.
///
/// None of these are transient: the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text has no complete `<table>...</table>` region.
    #[error("no table found")]
    NoTableFound,

    /// An anchor phrase is missing from the document.
    #[error("section anchor not found: {0:?}")]
    SectionNotFound(String),

    /// A numeric cell contains no digits.
    #[error("no digits found in {0:?}")]
    NoDigitsFound(String),

    /// A numeric cell holds more digits than fit in an integer.
    #[error("integer overflow in {0:?}")]
    IntegerOverflow(String),

    /// A date cell is neither a single date nor a date range.
    #[error("unrecognized date format: {0:?}")]
    UnrecognizedDateFormat(String),

    /// A date cell has the right shape but is not a calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// An active-time cell is not `H:MM:SS`.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// The battery table has fewer rows than its schema.
    #[error("battery table has {found} rows, expected at least {expected}")]
    MalformedBatteryTable { found: usize, expected: usize },

    /// A row ends before a cell the extractor needs.
    #[error("missing cell")]
    MissingCell,
}

/// A [`ParseError`] located in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{}", location(.section, .row, .column), .kind)]
pub struct ExtractionError {
    /// Section being extracted, if known.
    pub section: Option<Section>,
    /// Row index within the section's table (0-based, header included).
    pub row: Option<usize>,
    /// Cell index within the row (0-based).
    pub column: Option<usize>,
    /// Underlying failure.
    #[source]
    pub kind: ParseError,
}

impl ExtractionError {
    pub fn new(kind: ParseError) -> Self {
        Self {
            section: None,
            row: None,
            column: None,
            kind,
        }
    }

    pub fn in_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn at_cell(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }
}

impl From<ParseError> for ExtractionError {
    fn from(kind: ParseError) -> Self {
        Self::new(kind)
    }
}

fn location(section: &Option<Section>, row: &Option<usize>, column: &Option<usize>) -> String {
    let mut parts = Vec::new();
    if let Some(section) = section {
        parts.push(format!("{} section", section));
    }
    if let Some(row) = row {
        parts.push(format!("row {}", row));
    }
    if let Some(column) = column {
        parts.push(format!("column {}", column));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("{}: ", parts.join(", "))
    }
}

/// Result type for the battrep library.
pub type Result<T> = std::result::Result<T, BattrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let err = ExtractionError::new(ParseError::NoDigitsFound("-".to_string()))
            .in_section(Section::BatteryInfo)
            .at_cell(7, 1);

        assert_eq!(
            err.to_string(),
            "battery info section, row 7, column 1: no digits found in \"-\""
        );
    }

    #[test]
    fn test_display_without_location() {
        let err = ExtractionError::from(ParseError::NoTableFound);
        assert_eq!(err.to_string(), "no table found");
    }
}
