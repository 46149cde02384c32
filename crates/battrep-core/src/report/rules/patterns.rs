//! Common regex patterns for report cells.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Active time on battery: H:MM:SS, hours unbounded
    pub static ref ACTIVE_DURATION: Regex = Regex::new(
        r"^(\d+):(\d+):(\d+)$"
    ).unwrap();
}
