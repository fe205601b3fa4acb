use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("convert").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn csv_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

fn wrapped_export() -> Value {
    json!({
        "success": true,
        "data": {
            "version": "2",
            "exported_at": "2025-11-27T10:00:00Z",
            "data": {
                "sleep_sessions": [
                    {"id": 1, "sleep_time": "2025-01-01T23:00:00", "wake_time": "2025-01-02T07:00:00"}
                ],
                "transactions": [
                    {"id": 2, "transaction_date": "2025-01-03", "amount": "19.99"},
                    {"id": 1, "transaction_date": "2025-01-02", "amount": "-42.50"}
                ],
                "bodyweight_entries": []
            }
        }
    })
}

#[test]
fn convert_writes_csv_and_summary() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "export.json", &wrapped_export());
    let out = tmp.path().join("csv");

    cmd()
        .arg(&input)
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("EXPORT SUMMARY REPORT"))
        .stdout(contains("Version: 2"))
        .stdout(contains("Total Records Exported: 3"))
        .stdout(contains("finance_transactions.csv"))
        .stderr(contains("bodyweight_entries: No data found (skipped)"));

    assert_eq!(
        csv_files(&out),
        vec!["finance_transactions.csv", "sleep_sessions.csv"]
    );

    let transactions = fs::read_to_string(out.join("finance_transactions.csv")).unwrap();
    assert_eq!(
        transactions,
        "id,transaction_date,amount,transaction_date_readable,transaction_type,amount_absolute\n\
         1,2025-01-02,-42.5,2025-01-02,Expense,42.5\n\
         2,2025-01-03,19.99,2025-01-03,Income,19.99\n"
    );

    let sleep = fs::read_to_string(out.join("sleep_sessions.csv")).unwrap();
    assert!(sleep.lines().nth(1).unwrap().ends_with(",8.0"));
}

#[test]
fn no_summary_flag() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "export.json", &wrapped_export());

    cmd()
        .arg(&input)
        .arg("--no-summary")
        .assert()
        .success()
        .stdout(contains("EXPORT SUMMARY REPORT").not());

    assert_eq!(
        csv_files(tmp.path()),
        vec!["finance_transactions.csv", "sleep_sessions.csv"]
    );
}

#[test]
fn missing_input_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("csv");

    cmd()
        .arg(tmp.path().join("nope.json"))
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("JSON file not found"));

    assert!(csv_files(&out).is_empty());
}

#[test]
fn malformed_json() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("bad.json");
    fs::write(&input, "{\"data\": {\"sleep_sessions\": [}").unwrap();

    cmd()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Failed to parse JSON file"));

    assert!(csv_files(tmp.path()).is_empty());
}

#[test]
fn missing_data_section() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(
        tmp.path(),
        "export.json",
        &json!({"version": "1", "exported_at": "t"}),
    );

    cmd()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("'data' section not found"));

    assert!(csv_files(tmp.path()).is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "export.json", &wrapped_export());
    let out = tmp.path().join("csv");

    cmd().arg(&input).arg(&out).arg("--no-summary").assert().success();
    let first: Vec<Vec<u8>> = csv_files(&out)
        .iter()
        .map(|n| fs::read(out.join(n)).unwrap())
        .collect();

    cmd().arg(&input).arg(&out).arg("--no-summary").assert().success();
    let second: Vec<Vec<u8>> = csv_files(&out)
        .iter()
        .map(|n| fs::read(out.join(n)).unwrap())
        .collect();

    assert_eq!(first, second);
}
