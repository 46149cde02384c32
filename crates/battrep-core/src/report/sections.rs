//! Section location by anchor phrases.

use crate::error::ParseError;
use crate::models::config::SectionAnchors;
use crate::models::report::Section;

/// The three table-bearing regions of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSections<'a> {
    pub battery_info: &'a str,
    pub usage_history: &'a str,
    pub capacity_history: &'a str,
}

impl<'a> ReportSections<'a> {
    /// Get the text of one section.
    pub fn get(&self, section: Section) -> &'a str {
        match section {
            Section::BatteryInfo => self.battery_info,
            Section::UsageHistory => self.usage_history,
            Section::CapacityHistory => self.capacity_history,
        }
    }
}

/// Split a report into its sections.
pub fn split_sections<'a>(
    document: &'a str,
    anchors: &SectionAnchors,
) -> Result<ReportSections<'a>, ParseError> {
    Ok(ReportSections {
        battery_info: locate_section(document, Section::BatteryInfo, anchors)?,
        usage_history: locate_section(document, Section::UsageHistory, anchors)?,
        capacity_history: locate_section(document, Section::CapacityHistory, anchors)?,
    })
}

/// Locate one section, independently of the others.
pub fn locate_section<'a>(
    document: &'a str,
    section: Section,
    anchors: &SectionAnchors,
) -> Result<&'a str, ParseError> {
    let (start, end) = match section {
        Section::BatteryInfo => (&anchors.battery_info_start, &anchors.battery_info_end),
        Section::UsageHistory => (&anchors.usage_history_start, &anchors.usage_history_end),
        Section::CapacityHistory => {
            (&anchors.capacity_history_start, &anchors.capacity_history_end)
        }
    };

    between(document, start, end)
}

/// Text after the first `start`, up to the next `start` or the first `end`,
/// whichever comes first.
fn between<'a>(document: &'a str, start: &str, end: &str) -> Result<&'a str, ParseError> {
    let from = document
        .find(start)
        .ok_or_else(|| ParseError::SectionNotFound(start.to_string()))?
        + start.len();

    if !document.contains(end) {
        return Err(ParseError::SectionNotFound(end.to_string()));
    }

    let rest = &document[from..];
    let rest = rest.find(start).map_or(rest, |i| &rest[..i]);
    Ok(rest.find(end).map_or(rest, |i| &rest[..i]))
}
