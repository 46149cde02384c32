//! Installed batteries extraction.

use tracing::debug;

use crate::error::{ExtractionError, ParseError};
use crate::models::report::{BatteryInfo, Section};
use crate::table::{extract_table, Table};

use super::rules::digits_to_integer;
use super::schema::{row_spec, validate_battery_table, BatteryRow, CellKind, LABEL_COLUMNS};
use super::Result;

/// Extract battery information from the battery info section.
pub fn extract_battery_info(section: &str) -> Result<BatteryInfo> {
    let in_section = |e: ExtractionError| e.in_section(Section::BatteryInfo);

    let table = extract_table(section).map_err(|e| in_section(e.into()))?;
    let count = validate_battery_table(&table).map_err(|e| in_section(e.into()))?;

    debug!("Battery table has {} rows and {} batteries", table.len(), count);

    let info = BatteryInfo {
        names: text_column(&table, BatteryRow::Name, count),
        manufacturers: text_column(&table, BatteryRow::Manufacturer, count),
        serials: text_column(&table, BatteryRow::Serial, count),
        chemistries: text_column(&table, BatteryRow::Chemistry, count),
        design_capacities: integer_column(&table, BatteryRow::DesignCapacity, count)
            .map_err(in_section)?,
        full_charge_capacities: integer_column(&table, BatteryRow::FullChargeCapacity, count)
            .map_err(in_section)?,
        cycle_counts: integer_column(&table, BatteryRow::CycleCount, count)
            .map_err(in_section)?,
    };

    Ok(info)
}

/// Battery cells of a text row. Omitted cells read as empty.
fn text_column(table: &Table, role: BatteryRow, count: usize) -> Vec<String> {
    let spec = row_spec(role);
    debug_assert_eq!(spec.kind, CellKind::Text);

    let row = table.row(spec.index);
    (LABEL_COLUMNS..LABEL_COLUMNS + count)
        .map(|column| {
            row.and_then(|r| r.cell(column))
                .map(|cell| cell.as_str().to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Battery cells of an integer row.
fn integer_column(
    table: &Table,
    role: BatteryRow,
    count: usize,
) -> std::result::Result<Vec<u64>, ExtractionError> {
    let spec = row_spec(role);
    debug_assert_eq!(spec.kind, CellKind::Integer);

    let row = table.row(spec.index);
    (LABEL_COLUMNS..LABEL_COLUMNS + count)
        .map(|column| {
            let at = |kind: ParseError| ExtractionError::new(kind).at_cell(spec.index, column);
            let cell = row
                .and_then(|r| r.cell(column))
                .ok_or_else(|| at(ParseError::MissingCell))?;
            digits_to_integer(cell.as_str()).map_err(at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn battery_table(header: &str, rows: &[&str]) -> String {
        let mut html = format!("<table><thead><tr>{}</tr></thead>", header);
        for row in rows {
            html.push_str("<tr>");
            html.push_str(row);
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }

    #[test]
    fn test_three_batteries() {
        let html = battery_table(
            "<td>&nbsp;</td><td>BATTERY 1</td><td>BATTERY 2</td><td>BATTERY 3</td>",
            &[
                "<td>NAME</td><td>A</td><td>B</td><td>C</td>",
                "<td>MANUFACTURER</td><td>SMP</td><td>LGC</td><td>SMP</td>",
                "<td>SERIAL</td><td>1</td><td>2</td><td>3</td>",
                "<td>CHEMISTRY</td><td>LiP</td><td>LION</td><td>LiP</td>",
                "<td>DESIGN</td><td>56,000 mWh</td><td>42,000 mWh</td><td>1.109</td>",
                "<td>FULL</td><td>49,510 mWh</td><td>0993mWh</td><td>900 mWh</td>",
                "<td>CYCLES</td><td>120</td><td>3</td><td>0</td>",
            ],
        );

        let info = extract_battery_info(&html).unwrap();

        assert_eq!(info.battery_count(), 3);
        for len in [
            info.names.len(),
            info.manufacturers.len(),
            info.serials.len(),
            info.chemistries.len(),
            info.design_capacities.len(),
            info.full_charge_capacities.len(),
            info.cycle_counts.len(),
        ] {
            assert_eq!(len, 3);
        }

        assert_eq!(info.names, vec!["A", "B", "C"]);
        assert_eq!(info.design_capacities, vec![56000, 42000, 1109]);
        assert_eq!(info.full_charge_capacities, vec![49510, 993, 900]);
        assert_eq!(info.cycle_counts, vec![120, 3, 0]);
    }

    #[test]
    fn test_omitted_text_cell_reads_empty() {
        let html = battery_table(
            "<td></td><td>BATTERY 1</td><td>BATTERY 2</td>",
            &[
                "<td>NAME</td><td>A</td><td>B</td>",
                "<td>MANUFACTURER</td><td>SMP</td>",
                "<td>SERIAL</td><td>1</td><td>2</td>",
                "<td>CHEMISTRY</td><td>LiP</td><td>LiP</td>",
                "<td>DESIGN</td><td>1</td><td>2</td>",
                "<td>FULL</td><td>1</td><td>2</td>",
                "<td>CYCLES</td><td>1</td><td>2</td>",
            ],
        );

        let info = extract_battery_info(&html).unwrap();
        assert_eq!(info.manufacturers, vec!["SMP", ""]);
    }

    #[test]
    fn test_non_numeric_cycle_count() {
        let html = battery_table(
            "<td></td><td>BATTERY 1</td>",
            &[
                "<td>NAME</td><td>A</td>",
                "<td>MANUFACTURER</td><td>SMP</td>",
                "<td>SERIAL</td><td>1</td>",
                "<td>CHEMISTRY</td><td>LiP</td>",
                "<td>DESIGN</td><td>1</td>",
                "<td>FULL</td><td>1</td>",
                "<td>CYCLES</td><td>-</td>",
            ],
        );

        let err = extract_battery_info(&html).unwrap_err();
        assert_eq!(err.section, Some(Section::BatteryInfo));
        assert_eq!(err.row, Some(7));
        assert_eq!(err.column, Some(1));
        assert_eq!(err.kind, ParseError::NoDigitsFound("-".to_string()));
    }

    #[test]
    fn test_missing_integer_cell() {
        let html = battery_table(
            "<td></td><td>BATTERY 1</td>",
            &[
                "<td>NAME</td><td>A</td>",
                "<td>MANUFACTURER</td><td>SMP</td>",
                "<td>SERIAL</td><td>1</td>",
                "<td>CHEMISTRY</td><td>LiP</td>",
                "<td>DESIGN</td>",
                "<td>FULL</td><td>1</td>",
                "<td>CYCLES</td><td>1</td>",
            ],
        );

        let err = extract_battery_info(&html).unwrap_err();
        assert_eq!(err.kind, ParseError::MissingCell);
        assert_eq!((err.row, err.column), (Some(5), Some(1)));
    }

    #[test]
    fn test_malformed_table() {
        let html = battery_table("<td></td><td>BATTERY 1</td>", &["<td>NAME</td><td>A</td>"]);

        let err = extract_battery_info(&html).unwrap_err();
        assert_eq!(
            err.kind,
            ParseError::MalformedBatteryTable {
                found: 2,
                expected: 8
            }
        );
    }

    #[test]
    fn test_no_table() {
        let err = extract_battery_info("Installed batteries, but no table").unwrap_err();
        assert_eq!(err.kind, ParseError::NoTableFound);
        assert_eq!(err.section, Some(Section::BatteryInfo));
    }
}
