//! Active-time parsing for usage history cells.

use crate::error::ParseError;

use super::patterns::ACTIVE_DURATION;

pub const SECS_PER_HOUR: u64 = 60 * 60;

/// Longest active time a single usage period can plausibly report.
///
/// Some reports carry periods with active times of hundreds of hours;
/// anything above one week is treated as bogus.
pub const MAX_PLAUSIBLE_ACTIVE_SECS: u64 = 7 * 24 * SECS_PER_HOUR;

/// Parse an `H:MM:SS` active time into seconds.
///
/// Components are not range checked, so "1:75:00" is 8100 seconds.
pub fn parse_active_duration(text: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidDuration(text.to_string());

    let caps = ACTIVE_DURATION.captures(text).ok_or_else(invalid)?;
    let hours: u64 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: u64 = caps[2].parse().map_err(|_| invalid())?;
    let seconds: u64 = caps[3].parse().map_err(|_| invalid())?;

    hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_active_duration("1:00:00"), Ok(3600));
        assert_eq!(parse_active_duration("8:03:56"), Ok(29036));
        assert_eq!(parse_active_duration("0:00:07"), Ok(7));
    }

    #[test]
    fn test_long_hours() {
        assert_eq!(parse_active_duration("200:00:00"), Ok(720_000));
        assert!(parse_active_duration("200:00:00").unwrap() > MAX_PLAUSIBLE_ACTIVE_SECS);
        assert_eq!(parse_active_duration("168:00:00"), Ok(MAX_PLAUSIBLE_ACTIVE_SECS));
    }

    #[test]
    fn test_components_are_not_range_checked() {
        assert_eq!(parse_active_duration("1:75:00"), Ok(8100));
    }

    #[test]
    fn test_invalid_duration() {
        for text in ["-", "1:00", "1:00:00:00", "a:bc:de", "", "99999999999999999999:00:00"] {
            assert_eq!(
                parse_active_duration(text),
                Err(ParseError::InvalidDuration(text.to_string())),
                "{text}"
            );
        }
    }
}
