//! Integer extraction from mixed text.

use crate::error::ParseError;

/// Concatenate every decimal digit in `text` and parse the result.
///
/// Separators are dropped, not interpreted: "49,510 mWh" is 49510 and
/// "1.109" is 1109.
pub fn digits_to_integer(text: &str) -> Result<u64, ParseError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(ParseError::NoDigitsFound(text.to_string()));
    }

    digits
        .parse()
        .map_err(|_| ParseError::IntegerOverflow(text.to_string()))
}
