//! Output formatting for extracted reports.
//!
//! Capacity retention and fade percentages are presentation values and are
//! computed here, not in the core library.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use battrep_core::models::config::OutputConfig;
use battrep_core::{BatteryInfo, BatteryReport, TimeSeries};

/// Health bands drawn over the capacity history, in percent of design.
const HEALTH_BANDS: [(f64, &str); 3] = [(90.0, "good"), (80.0, "fair"), (70.0, "worn")];

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Which part of the report to output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Dataset {
    /// Everything
    All,
    /// Installed batteries
    Battery,
    /// Capacity history
    Capacity,
    /// Cumulative usage history
    Usage,
}

impl Dataset {
    fn includes(self, other: Dataset) -> bool {
        self == Dataset::All || self == other
    }
}

/// Full charge capacity as a percentage of design capacity, rounded to 0.1.
pub fn capacity_retention(full_charge: u64, design: u64) -> Option<f64> {
    if design == 0 {
        return None;
    }
    Some((full_charge as f64 / design as f64 * 1000.0).round() / 10.0)
}

/// Health band label for a capacity percentage.
pub fn health_band(percent: f64) -> &'static str {
    HEALTH_BANDS
        .iter()
        .find(|(threshold, _)| percent >= *threshold)
        .map_or("replace", |(_, label)| *label)
}

/// Capacity history as percentages of the summed design capacity.
pub fn capacity_fade(series: &TimeSeries<u64>, total_design: u64) -> Vec<(NaiveDate, Option<f64>)> {
    series
        .iter()
        .map(|(date, capacity)| {
            let percent = (total_design > 0)
                .then(|| *capacity as f64 * 100.0 / total_design as f64);
            (date, percent)
        })
        .collect()
}

pub fn format_report(
    report: &BatteryReport,
    format: OutputFormat,
    dataset: Dataset,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("Invalid date format: {}", config.date_format);
    }

    match format {
        OutputFormat::Json => format_json(report, dataset, config),
        OutputFormat::Csv => format_csv(report, dataset, config),
        OutputFormat::Text => Ok(format_text(report, dataset, config)),
    }
}

fn format_json(
    report: &BatteryReport,
    dataset: Dataset,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    let value = match dataset {
        Dataset::All => serde_json::to_value(report)?,
        Dataset::Battery => serde_json::to_value(&report.battery)?,
        Dataset::Capacity => serde_json::to_value(&report.capacity_history)?,
        Dataset::Usage => serde_json::to_value(&report.usage_history)?,
    };

    if config.pretty_json {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(&value)?)
    }
}

fn format_csv(
    report: &BatteryReport,
    dataset: Dataset,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    let mut blocks = Vec::new();

    if dataset.includes(Dataset::Battery) {
        blocks.push(battery_csv(&report.battery)?);
    }
    if dataset.includes(Dataset::Capacity) {
        blocks.push(capacity_csv(report, config)?);
    }
    if dataset.includes(Dataset::Usage) {
        blocks.push(usage_csv(&report.usage_history, config)?);
    }

    Ok(blocks.join("\n"))
}

fn battery_csv(battery: &BatteryInfo) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "battery",
        "name",
        "manufacturer",
        "serial",
        "chemistry",
        "design_capacity_mwh",
        "full_charge_capacity_mwh",
        "retention_percent",
        "cycle_count",
    ])?;

    for (i, record) in battery.records().iter().enumerate() {
        wtr.write_record([
            &(i + 1).to_string(),
            &record.name,
            &record.manufacturer,
            &record.serial,
            &record.chemistry,
            &record.design_capacity.to_string(),
            &record.full_charge_capacity.to_string(),
            &capacity_retention(record.full_charge_capacity, record.design_capacity)
                .map(|r| format!("{:.1}", r))
                .unwrap_or_default(),
            &record.cycle_count.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn capacity_csv(report: &BatteryReport, config: &OutputConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let fade = capacity_fade(&report.capacity_history, report.battery.total_design_capacity());

    wtr.write_record(["date", "full_charge_capacity_mwh", "percent_of_design"])?;
    for ((date, capacity), (_, percent)) in report.capacity_history.iter().zip(fade) {
        wtr.write_record([
            &date.format(&config.date_format).to_string(),
            &capacity.to_string(),
            &percent.map(|p| format!("{:.1}", p)).unwrap_or_default(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn usage_csv(usage: &TimeSeries<u64>, config: &OutputConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "cumulative_hours"])?;
    for (date, hours) in usage.iter() {
        wtr.write_record([&date.format(&config.date_format).to_string(), &hours.to_string()])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(report: &BatteryReport, dataset: Dataset, config: &OutputConfig) -> String {
    let mut output = String::new();

    if dataset.includes(Dataset::Battery) {
        output.push_str("Installed batteries:\n");
        for (i, record) in report.battery.records().iter().enumerate() {
            output.push_str(&format!("  Battery {}\n", i + 1));
            output.push_str(&format!("    Name:               {}\n", record.name));
            output.push_str(&format!("    Manufacturer:       {}\n", record.manufacturer));
            output.push_str(&format!("    Serial Number:      {}\n", record.serial));
            output.push_str(&format!("    Chemistry:          {}\n", record.chemistry));
            output.push_str(&format!("    Design Capacity:    {} mWh\n", record.design_capacity));
            output.push_str(&format!(
                "    Current Capacity:   {} mWh\n",
                record.full_charge_capacity
            ));
            if let Some(retention) =
                capacity_retention(record.full_charge_capacity, record.design_capacity)
            {
                output.push_str(&format!("    Capacity Retention: {:.1}%\n", retention));
            }
            output.push_str(&format!("    Cycle Count:        {}\n", record.cycle_count));
        }
        output.push('\n');
    }

    if dataset.includes(Dataset::Capacity) {
        output.push_str("Battery capacity fade:\n");
        let fade = capacity_fade(&report.capacity_history, report.battery.total_design_capacity());
        for ((date, capacity), (_, percent)) in report.capacity_history.iter().zip(fade) {
            let detail = percent
                .map(|p| format!("{:>5.1}%  {}", p, health_band(p)))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}  {:>7} mWh  {}\n",
                date.format(&config.date_format),
                capacity,
                detail
            ));
        }
        output.push('\n');
    }

    if dataset.includes(Dataset::Usage) {
        output.push_str("Cumulative battery usage:\n");
        for (date, hours) in report.usage_history.iter() {
            output.push_str(&format!(
                "  {}  {:>5} hrs\n",
                date.format(&config.date_format),
                hours
            ));
        }
    }

    output
}
