//! Fixed table layouts of the battery report.
//!
//! The report identifies rows by position only. The positions are declared
//! here and checked once, instead of being spread across the extractors.

use crate::error::ParseError;
use crate::table::Table;

/// Leading label cells in every battery table row.
pub const LABEL_COLUMNS: usize = 1;

/// Role of a battery table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryRow {
    Header,
    Name,
    Manufacturer,
    Serial,
    Chemistry,
    DesignCapacity,
    FullChargeCapacity,
    CycleCount,
}

/// How the battery cells of a row are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Column labels; only the cell count is used.
    Label,
    /// Raw cell text.
    Text,
    /// Integer via `digits_to_integer`.
    Integer,
}

/// Position and value kind of one battery table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpec {
    pub role: BatteryRow,
    pub index: usize,
    pub kind: CellKind,
}

const fn spec(role: BatteryRow, index: usize, kind: CellKind) -> RowSpec {
    RowSpec { role, index, kind }
}

/// Battery table rows, in table order.
pub static BATTERY_ROWS: [RowSpec; 8] = [
    spec(BatteryRow::Header, 0, CellKind::Label),
    spec(BatteryRow::Name, 1, CellKind::Text),
    spec(BatteryRow::Manufacturer, 2, CellKind::Text),
    spec(BatteryRow::Serial, 3, CellKind::Text),
    spec(BatteryRow::Chemistry, 4, CellKind::Text),
    spec(BatteryRow::DesignCapacity, 5, CellKind::Integer),
    spec(BatteryRow::FullChargeCapacity, 6, CellKind::Integer),
    spec(BatteryRow::CycleCount, 7, CellKind::Integer),
];

/// Look up the spec of a battery row.
pub fn row_spec(role: BatteryRow) -> &'static RowSpec {
    BATTERY_ROWS
        .iter()
        .find(|spec| spec.role == role)
        .unwrap_or(&BATTERY_ROWS[0])
}

/// Check a battery table against [`BATTERY_ROWS`] and return the battery count.
pub fn validate_battery_table(table: &Table) -> Result<usize, ParseError> {
    let expected = BATTERY_ROWS.len();
    if table.len() < expected {
        return Err(ParseError::MalformedBatteryTable {
            found: table.len(),
            expected,
        });
    }

    let header = table
        .row(row_spec(BatteryRow::Header).index)
        .map_or(0, |row| row.len());

    Ok(header.saturating_sub(LABEL_COLUMNS))
}

/// Capacity history: one header row, then `date | capacity | ...`.
pub mod capacity {
    pub const HEADER_ROWS: usize = 1;
    pub const DATE_COLUMN: usize = 0;
    pub const CAPACITY_COLUMN: usize = 1;
}

/// Usage history: two header rows, then `date | active | ...`.
pub mod usage {
    pub const HEADER_ROWS: usize = 2;
    pub const DATE_COLUMN: usize = 0;
    pub const ACTIVE_COLUMN: usize = 1;
}
