//! Integration tests for the wordbench CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "Y, y! Yes; the cat sat. y\nyonder Y-ray and \"y\".\n";

/// Command isolated from the user's config files and WORDBENCH_ variables
fn wordbench(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("WORDBENCH_QUERY")
        .env_remove("WORDBENCH_REPETITIONS");
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("word counting"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordbench"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_run_writes_csv_for_cpu_strategies() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("book.txt");
    let csv = temp_dir.path().join("out.csv");
    fs::write(&input, SAMPLE).unwrap();

    wordbench(&temp_dir)
        .args(["run", "--input"])
        .arg(&input)
        .args(["--query", "y", "-n", "2", "-s", "serial", "-s", "parallel-cpu", "--workers", "3"])
        .arg("--csv")
        .arg(&csv)
        .arg("--no-chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("SerialCPU: 4 occurrences"))
        .stdout(predicate::str::contains("ParallelCPU: 4 occurrences"));

    let written = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "method,occurrences,elapsed_ms");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("SerialCPU,4,"));
    assert!(lines[2].starts_with("ParallelCPU,4,"));
    assert!(lines[3].starts_with("SerialCPU,4,"));
    assert!(lines[4].starts_with("ParallelCPU,4,"));
}

#[cfg(not(feature = "opencl"))]
#[test]
fn test_missing_gpu_is_recorded_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("book.txt");
    let csv = temp_dir.path().join("out.csv");
    fs::write(&input, SAMPLE).unwrap();

    wordbench(&temp_dir)
        .args(["run", "--input"])
        .arg(&input)
        .args(["-n", "2", "-s", "serial", "-s", "parallel-gpu"])
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("SerialCPU: 4 occurrences"))
        .stdout(predicate::str::contains("ParallelGPU: failed (gpu_unavailable)"));

    let written = fs::read_to_string(&csv).unwrap();
    assert!(written.contains("ParallelGPU,,"));
}

#[test]
fn test_run_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("book.txt");
    let json = temp_dir.path().join("out.json");
    fs::write(&input, "the cat and the hat").unwrap();

    wordbench(&temp_dir)
        .args(["--quiet", "run", "--input"])
        .arg(&input)
        .args(["--query", "THE", "-s", "serial", "-s", "rayon"])
        .arg("--json")
        .arg(&json)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["tool"], "wordbench");
    assert_eq!(report["consistent"], true);
    assert_eq!(report["measurements"].as_array().unwrap().len(), 6);
    assert_eq!(report["measurements"][1]["strategy"], "RayonCPU");
    assert_eq!(report["measurements"][1]["occurrences"], 2);
}

#[test]
fn test_invalid_utf8_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.txt");
    fs::write(&input, [b'o', b'k', b' ', 0xff, 0xfe]).unwrap();

    wordbench(&temp_dir)
        .args(["run", "--input"])
        .arg(&input)
        .args(["-s", "serial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();

    wordbench(&temp_dir)
        .args(["run", "--input", "does-not-exist.txt", "-s", "serial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_zero_repetitions_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("book.txt");
    fs::write(&input, SAMPLE).unwrap();

    wordbench(&temp_dir)
        .args(["run", "--input"])
        .arg(&input)
        .args(["-n", "0", "-s", "serial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repetitions"));
}

#[test]
fn test_config_file_supplies_run_settings() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("book.txt");
    fs::write(&input, "ab AB ab cd").unwrap();
    let config = temp_dir.path().join("bench.toml");
    fs::write(
        &config,
        format!(
            "input = {:?}\nquery = \"ab\"\nrepetitions = 1\nstrategies = [\"serial\"]\n[output]\nchart = false\n",
            input.display().to_string()
        ),
    )
    .unwrap();

    wordbench(&temp_dir)
        .arg("--config")
        .arg(&config)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("SerialCPU: 3 occurrences"));
}

#[test]
fn test_config_show_prints_merged_toml() {
    let temp_dir = TempDir::new().unwrap();

    wordbench(&temp_dir)
        .args(["config", "show"])
        .env("WORDBENCH_QUERY", "needle")
        .assert()
        .success()
        .stdout(predicate::str::contains("query = \"needle\""))
        .stdout(predicate::str::contains("[parallel]"));
}

#[test]
fn test_devices_command_runs() {
    let temp_dir = TempDir::new().unwrap();

    wordbench(&temp_dir)
        .arg("devices")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compute Devices"));
}
