//! Date extraction for report period cells.

use chrono::{NaiveDate, TimeDelta};

use crate::error::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// Separator count of a single `YYYY-MM-DD` date.
const SINGLE_DATE_DASHES: usize = 2;
/// Separator count of `YYYY-MM-DD-YYYY-MM-DD` once spaces are stripped.
const DATE_RANGE_DASHES: usize = 5;

/// Parse a period cell into one date.
///
/// A single date is returned as is. A range collapses to its midpoint,
/// rounded down to whole days.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    match text.matches('-').count() {
        SINGLE_DATE_DASHES => parse_single(text, text),
        DATE_RANGE_DASHES => {
            let start = text
                .get(..DATE_LEN)
                .ok_or_else(|| ParseError::InvalidDate(text.to_string()))?;
            let end = text
                .get(DATE_LEN + 1..)
                .map(|rest| rest.get(..DATE_LEN).unwrap_or(rest))
                .ok_or_else(|| ParseError::InvalidDate(text.to_string()))?;

            midpoint(parse_single(start, text)?, parse_single(end, text)?)
                .ok_or_else(|| ParseError::InvalidDate(text.to_string()))
        }
        _ => Err(ParseError::UnrecognizedDateFormat(text.to_string())),
    }
}

/// Midpoint of two dates, rounded down to whole days.
pub fn midpoint(start: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
    let half = end.signed_duration_since(start).num_days().div_euclid(2);
    start.checked_add_signed(TimeDelta::days(half))
}

fn parse_single(date: &str, source: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_date() {
        assert_eq!(parse_date("2021-06-20"), Ok(date(2021, 6, 20)));
    }

    #[test]
    fn test_range_midpoint() {
        assert_eq!(parse_date("2018-01-05-2018-01-07"), Ok(date(2018, 1, 6)));
    }

    #[test]
    fn test_odd_range_rounds_down() {
        // 7 days apart: 3.5 days after the start
        assert_eq!(parse_date("2021-06-14-2021-06-21"), Ok(date(2021, 6, 17)));
        assert_eq!(parse_date("2021-06-20-2021-06-21"), Ok(date(2021, 6, 20)));
    }

    #[test]
    fn test_range_across_month() {
        assert_eq!(parse_date("2021-01-28-2021-02-03"), Ok(date(2021, 1, 31)));
    }

    #[test]
    fn test_reversed_range_rounds_down() {
        assert_eq!(midpoint(date(2021, 1, 4), date(2021, 1, 1)), Some(date(2021, 1, 2)));
    }

    #[test]
    fn test_unrecognized_format() {
        assert_eq!(
            parse_date("20210620"),
            Err(ParseError::UnrecognizedDateFormat("20210620".to_string()))
        );
        assert_eq!(
            parse_date("2021-06"),
            Err(ParseError::UnrecognizedDateFormat("2021-06".to_string()))
        );
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert_eq!(
            parse_date("2021-13-01"),
            Err(ParseError::InvalidDate("2021-13-01".to_string()))
        );
        assert_eq!(
            parse_date("2021-01-01-2021-02-30"),
            Err(ParseError::InvalidDate("2021-01-01-2021-02-30".to_string()))
        );
    }

    #[test]
    fn test_truncated_range() {
        assert_eq!(
            parse_date("2021-01-01-2"),
            Err(ParseError::UnrecognizedDateFormat("2021-01-01-2".to_string()))
        );
        assert_eq!(
            parse_date("2021-1-1-2021-01-0"),
            Err(ParseError::InvalidDate("2021-1-1-2021-01-0".to_string()))
        );
    }
}
