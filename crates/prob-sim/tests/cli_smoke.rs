use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn prob_sim() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prob-sim"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn generate_writes_fixtures_and_reports_count() {
    let dir = tempdir().unwrap();
    let output = prob_sim()
        .args(["generate", "--seed", "42", "--out"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("generated 8 fixture files in "));
    assert!(stdout.contains("boxplot_data.json"));
    assert!(dir.path().join("fixtures_manifest.json").exists());
}

#[test]
fn generate_into_missing_directory_fails_with_one_line() {
    let dir = tempdir().unwrap();
    let output = prob_sim()
        .args(["generate", "--out"])
        .arg(dir.path().join("missing"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let diagnostic: Vec<&str> = stderr.lines().filter(|l| l.starts_with("error:")).collect();
    assert_eq!(diagnostic.len(), 1);
    assert!(diagnostic[0].contains("output directory does not exist"));
}

#[test]
fn summarize_prints_population_statistics() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("values.json");
    fs::write(&input, "[1, 2, 3, 4, 5]").unwrap();

    let output = prob_sim()
        .args(["summarize", "--percentile", "90", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["mean"], 3.0);
    assert_eq!(summary["median"], 3.0);
    assert_eq!(summary["variance"], 2.0);
    assert_eq!(summary["variance_convention"], "population");
    assert!(summary["percentiles"]["p90"].is_number());
}

#[test]
fn summarize_rejects_an_empty_sample() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("values.json");
    fs::write(&input, "[]").unwrap();

    let output = prob_sim().args(["summarize", "--input"]).arg(&input).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("invalid input"));
}

#[test]
fn pmf_prints_the_binomial_distribution() {
    let output = prob_sim().args(["pmf", "--n", "5", "--p", "0.5"]).output().unwrap();
    assert!(output.status.success());
    let distribution: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(distribution["probabilities"][3], 0.3125);
    assert_eq!(distribution["probabilities"].as_array().unwrap().len(), 6);
}
