//! Battery report data models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the three textual regions of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Installed batteries table.
    BatteryInfo,
    /// Battery capacity history table.
    CapacityHistory,
    /// Usage history table.
    UsageHistory,
}

impl Section {
    /// All sections in document order.
    pub const ALL: [Section; 3] = [
        Section::BatteryInfo,
        Section::UsageHistory,
        Section::CapacityHistory,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::BatteryInfo => "battery info",
            Section::CapacityHistory => "capacity history",
            Section::UsageHistory => "usage history",
        };
        f.write_str(name)
    }
}

/// Installed batteries, one column entry per battery.
///
/// Every vector has the same length, equal to the number of batteries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryInfo {
    /// Battery names.
    pub names: Vec<String>,

    /// Manufacturers.
    pub manufacturers: Vec<String>,

    /// Serial numbers.
    pub serials: Vec<String>,

    /// Cell chemistries (e.g. "LION", "LiP").
    pub chemistries: Vec<String>,

    /// Design capacities in mWh.
    pub design_capacities: Vec<u64>,

    /// Current full charge capacities in mWh.
    pub full_charge_capacities: Vec<u64>,

    /// Charge cycle counts.
    pub cycle_counts: Vec<u64>,
}

impl BatteryInfo {
    /// Number of installed batteries.
    pub fn battery_count(&self) -> usize {
        self.names.len()
    }

    /// Sum of all design capacities in mWh.
    pub fn total_design_capacity(&self) -> u64 {
        self.design_capacities.iter().sum()
    }

    /// Get one battery as a record.
    pub fn record(&self, index: usize) -> Option<BatteryRecord> {
        Some(BatteryRecord {
            name: self.names.get(index)?.clone(),
            manufacturer: self.manufacturers.get(index)?.clone(),
            serial: self.serials.get(index)?.clone(),
            chemistry: self.chemistries.get(index)?.clone(),
            design_capacity: *self.design_capacities.get(index)?,
            full_charge_capacity: *self.full_charge_capacities.get(index)?,
            cycle_count: *self.cycle_counts.get(index)?,
        })
    }

    /// All batteries as records, in column order.
    pub fn records(&self) -> Vec<BatteryRecord> {
        (0..self.battery_count())
            .filter_map(|i| self.record(i))
            .collect()
    }
}

/// A single battery, as a row view over [`BatteryInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub name: String,
    pub manufacturer: String,
    pub serial: String,
    pub chemistry: String,
    /// Design capacity in mWh.
    pub design_capacity: u64,
    /// Full charge capacity in mWh.
    pub full_charge_capacity: u64,
    pub cycle_count: u64,
}

/// Dated values in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "SeriesParts<V>",
    bound(deserialize = "V: Deserialize<'de>")
)]
pub struct TimeSeries<V> {
    dates: Vec<NaiveDate>,
    values: Vec<V>,
}

impl<V> TimeSeries<V> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, date: NaiveDate, value: V) {
        self.dates.push(date);
        self.values.push(value);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Point dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Point values.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Get the point at a position.
    pub fn get(&self, index: usize) -> Option<(NaiveDate, &V)> {
        Some((*self.dates.get(index)?, self.values.get(index)?))
    }

    /// Last point.
    pub fn last(&self) -> Option<(NaiveDate, &V)> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over `(date, value)` points.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &V)> {
        self.dates.iter().copied().zip(self.values.iter())
    }

    /// Whether dates never decrease.
    pub fn is_chronological(&self) -> bool {
        self.dates.windows(2).all(|w| w[0] <= w[1])
    }
}

impl<V> Default for TimeSeries<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(NaiveDate, V)> for TimeSeries<V> {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, V)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, value) in iter {
            series.push(date, value);
        }
        series
    }
}

#[derive(Deserialize)]
struct SeriesParts<V> {
    dates: Vec<NaiveDate>,
    values: Vec<V>,
}

impl<V> TryFrom<SeriesParts<V>> for TimeSeries<V> {
    type Error = String;

    fn try_from(parts: SeriesParts<V>) -> Result<Self, Self::Error> {
        if parts.dates.len() != parts.values.len() {
            return Err(format!(
                "series has {} dates but {} values",
                parts.dates.len(),
                parts.values.len()
            ));
        }
        Ok(Self {
            dates: parts.dates,
            values: parts.values,
        })
    }
}

/// Everything extracted from one report document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryReport {
    /// Installed batteries.
    pub battery: BatteryInfo,

    /// Full charge capacity over time, in mWh.
    pub capacity_history: TimeSeries<u64>,

    /// Cumulative active hours on battery over time.
    pub usage_history: TimeSeries<u64>,
}
