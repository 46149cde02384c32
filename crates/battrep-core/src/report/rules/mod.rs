//! Scalar parsers for report cell text.

pub mod numbers;
pub mod dates;
pub mod duration;
pub mod patterns;

pub use numbers::digits_to_integer;
pub use dates::{midpoint, parse_date};
pub use duration::{parse_active_duration, MAX_PLAUSIBLE_ACTIVE_SECS, SECS_PER_HOUR};
