use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "거래일시 25709702\n아메리카노 4500\n합계 12,500원\n";

fn recx(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }
    let mut cmd = Command::cargo_bin("recx").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn analyze_file_as_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    recx(&dir)
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""date":"25/09/02""#))
        .stdout(predicate::str::contains(r#""totalAmount":12500"#))
        .stdout(predicate::str::contains("아메리카노"));
}

#[test]
fn analyze_stdin_without_items() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["analyze", "-", "--no-items"])
        .write_stdin("함꼐 9 8 0 0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"date":null,"totalAmount":9800}"#));
}

#[test]
fn analyze_empty_input() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["analyze", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"date":null,"totalAmount":null,"items":[]}"#));
}

#[test]
fn analyze_text_format_with_explain() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["analyze", "-", "--format", "text", "--explain"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:  25/09/02 (2025-09-02)"))
        .stdout(predicate::str::contains("Total: 12500"))
        .stderr(predicate::str::contains("date from line 1"));
}

#[test]
fn analyze_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["analyze", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RECEIPT).unwrap();
    fs::write(inputs.join("b.txt"), "2024.07.02\n총액 3,000\n").unwrap();
    fs::write(inputs.join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    recx(&dir)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-j", "2"])
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .success();

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("25/09/02,2025-09-02,12500"));
    assert!(summary.contains("2024.07.02,2024-07-02,3000"));
    assert!(summary.contains(",error,"));

    let a = fs::read_to_string(outputs.join("a.json")).unwrap();
    assert!(a.contains("\"totalAmount\": 12500"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());
    recx(&dir)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["config", "set", "extraction.year_prefix", "26"])
        .assert()
        .success();

    recx(&dir)
        .args(["config", "get", "extraction.year_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"26\""));

    recx(&dir)
        .args(["analyze", "-"])
        .write_stdin("영수증 26.01.15\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""date":"26.01.15""#));
}

#[test]
fn config_set_rejects_invalid_prefix() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .args(["config", "set", "extraction.year_prefix", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("year_prefix"));
}

#[test]
fn batch_keeps_outputs_with_same_file_name() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(inputs.join("a")).unwrap();
    fs::create_dir_all(inputs.join("b")).unwrap();
    fs::write(inputs.join("a").join("x.txt"), "합계 1,000\n").unwrap();
    fs::write(inputs.join("b").join("x.txt"), "합계 2,000\n").unwrap();

    let pattern = format!("{}/**/*.txt", inputs.display());
    recx(&dir)
        .args(["batch", &pattern])
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .success()
        .stderr(predicate::str::contains("already taken"));

    let first = fs::read_to_string(outputs.join("x.json")).unwrap();
    let second = fs::read_to_string(outputs.join("x-2.json")).unwrap();
    let both = format!("{}{}", first, second);
    assert!(both.contains("\"totalAmount\": 1000"));
    assert!(both.contains("\"totalAmount\": 2000"));
}

#[test]
fn verbosity_flag_enables_debug_logs() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .env_remove("RUST_LOG")
        .args(["-vv", "analyze", "-"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzed"));
}

#[test]
fn rust_log_overrides_verbosity() {
    let dir = TempDir::new().unwrap();

    recx(&dir)
        .env("RUST_LOG", "recx_core=debug")
        .args(["analyze", "-"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzed"));

    recx(&dir)
        .env("RUST_LOG", "off")
        .args(["-vvv", "analyze", "-"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzed").not());
}
