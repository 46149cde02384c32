use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const REPORT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../battrep-core/testdata/battery-report.html"
);

fn battrep() -> Command {
    Command::cargo_bin("battrep").unwrap()
}

#[test]
fn test_extract_json() {
    battrep()
        .args(["extract", REPORT])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""cycle_counts":[187]"#))
        .stdout(predicate::str::contains(r#""names":["DELL1VX1H93"]"#));
}

#[test]
fn test_extract_usage_csv() {
    battrep()
        .args(["extract", REPORT, "-f", "csv", "--only", "usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date,cumulative_hours"))
        .stdout(predicate::str::contains("2021-06-22,29"))
        .stdout(predicate::str::contains("design_capacity_mwh").not());
}

#[test]
fn test_extract_text() {
    battrep()
        .args(["extract", REPORT, "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Capacity Retention: 88.4%"))
        .stdout(predicate::str::contains("Cumulative battery usage:"));
}

#[test]
fn test_extract_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");

    battrep()
        .args(["extract", REPORT, "--only", "capacity", "-o"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        json["values"],
        serde_json::json!([51023, 50640, 50112, 49798, 49510])
    );
}

#[test]
fn test_extract_missing_file() {
    battrep()
        .args(["extract", "does-not-exist.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_document_without_sections() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.html");
    fs::write(&input, "<html><body>nothing here</body></html>").unwrap();

    battrep()
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("anchor not found"));
}

#[test]
fn test_config_threshold_drops_usage_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"extraction":{"max_active_secs":3600}}"#).unwrap();

    battrep()
        .arg("--config")
        .arg(&config)
        .args(["extract", REPORT, "--only", "usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"dates":[],"values":[]}"#));
}

#[test]
fn test_batch_with_summary() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    fs::copy(REPORT, input_dir.path().join("laptop.html")).unwrap();
    fs::write(input_dir.path().join("notes.txt"), "not a report").unwrap();
    fs::write(input_dir.path().join("broken.html"), "<html></html>").unwrap();

    let pattern = input_dir.path().join("*").display().to_string();

    battrep()
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--output-dir"])
        .arg(output_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(output_dir.path().join("laptop.json").exists());
    assert!(!output_dir.path().join("broken.json").exists());

    let summary = fs::read_to_string(output_dir.path().join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("broken.html,error,"));
    assert!(lines[2].starts_with("laptop.html,success,1,56000,49510,88.4,187,5,4,29,1,"));
}

#[test]
fn test_batch_stops_on_error() {
    let input_dir = tempfile::tempdir().unwrap();
    fs::write(input_dir.path().join("broken.html"), "<html></html>").unwrap();

    let pattern = input_dir.path().join("*.html").display().to_string();

    battrep()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}
