//! Extract command - pull data out of a single battery report.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use battrep_core::{BatteryReportParser, ReportParser};

use super::config::load_config;
use super::read_report;
use crate::output::{format_report, Dataset, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Saved battery report (HTML)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only output one part of the report
    #[arg(long, value_enum, default_value = "all")]
    only: Dataset,

    /// Override the usage anomaly threshold, in hours
    #[arg(long)]
    max_active_hours: Option<u64>,

    /// List usage rows dropped as anomalies
    #[arg(long)]
    show_anomalies: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = read_report(&args.input)?;

    let mut parser = BatteryReportParser::from_config(&config.extraction);
    if let Some(hours) = args.max_active_hours {
        parser = parser.with_max_active_secs(hours.saturating_mul(3600));
    }

    let result = parser.parse(&document)?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_report(&result.report, args.format, args.only, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_anomalies {
        eprintln!();
        eprintln!(
            "{} {} usage rows dropped, {} rows without active time",
            style("ℹ").blue(),
            result.anomalies.len(),
            result.skipped_usage_rows
        );
        for anomaly in &result.anomalies {
            eprintln!(
                "  - row {}: {} reported {}s active",
                anomaly.row, anomaly.period, anomaly.active_secs
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
