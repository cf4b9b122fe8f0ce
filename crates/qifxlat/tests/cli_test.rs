//! End-to-end tests for the qifxlat binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn qifxlat() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qifxlat"));
    for var in [
        "QIFXLAT_INPUT",
        "QIFXLAT_OUTPUT_CSV_FILENAME",
        "QIFXLAT_OUTPUT_JSON_FILENAME",
        "QIFXLAT_OUTPUT_LEDGER_FILENAME",
        "QIFXLAT_SHOW_TIMING",
        "QIFXLAT_VERBOSE",
        "QIFXLAT_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ===== Conversion =====

#[test]
fn test_writes_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("out.csv");
    let json = dir.path().join("out.json");
    let ledger = dir.path().join("out.ledger");

    let output = qifxlat()
        .arg(fixtures_path("household.qif"))
        .arg("--output-csv-filename")
        .arg(&csv)
        .arg("--output-json-filename")
        .arg(&json)
        .arg("--output-ledger-filename")
        .arg(&ledger)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let csv = std::fs::read_to_string(csv).unwrap();
    let rows: Vec<_> = csv.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[0].starts_with("LINE,SEQ,DATE,"));
    assert!(rows[2].contains(",Bookshop,"));
    assert!(rows[2].contains(",CCD,Visa,"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap();
    assert_eq!(json["accounts"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["accounts"][1]["type"], "creditCard");
    assert_eq!(json["accounts"][1]["credit_limit"], "5000.00");
    assert_eq!(json["transactions"].as_array().map(Vec::len), Some(5));

    let ledger = std::fs::read_to_string(ledger).unwrap();
    assert!(ledger.starts_with("2016/01/01   Opening Balance"));
    assert!(ledger.contains("    Equity:Opening Balances\n"));
    assert!(ledger.contains("    ; January payment\n"));
}

#[test]
fn test_import_summary_is_logged() {
    let output = qifxlat()
        .arg("--input")
        .arg(fixtures_path("household.qif"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let log = stderr(&output);
    assert!(log.contains("accounts=3"), "stderr: {log}");
    assert!(log.contains("transactions=5"), "stderr: {log}");
    assert!(log.contains("validated only"), "stderr: {log}");
    assert!(log.contains("import: finished in"), "stderr: {log}");
}

#[test]
fn test_no_show_timing() {
    let output = qifxlat()
        .arg("--no-show-timing")
        .arg(fixtures_path("household.qif"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!stderr(&output).contains("finished in"));
}

// ===== Settings sources =====

#[test]
fn test_environment_and_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("qifxlat.json");
    let from_config = dir.path().join("config.ledger");
    let from_env = dir.path().join("env.ledger");
    std::fs::write(
        &config,
        serde_json::json!({
            "input": fixtures_path("household.qif"),
            "output-ledger-filename": from_config,
        })
        .to_string(),
    )
    .unwrap();

    let output = qifxlat()
        .arg("--config")
        .arg(&config)
        .env("QIFXLAT_OUTPUT_LEDGER_FILENAME", &from_env)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(from_env.exists());
    assert!(!from_config.exists());
}

// ===== Failures =====

#[test]
fn test_parse_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("out.ledger");

    let output = qifxlat()
        .arg(fixtures_path("bad_tag.qif"))
        .arg("--output-ledger-filename")
        .arg(&ledger)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Q0004"));
    assert!(!ledger.exists());
}

#[test]
fn test_invalid_utf8_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.qif");
    std::fs::write(&input, b"!Type:Bank\nD1/ 1'16\nPCaf\xe9\n^\n").unwrap();

    let output = qifxlat().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Q0001"));
}

#[test]
fn test_missing_file() {
    let output = qifxlat().arg("does-not-exist.qif").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read does-not-exist.qif"));
}

#[test]
fn test_missing_input_is_a_usage_error() {
    let output = qifxlat().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no input file given"));
}
