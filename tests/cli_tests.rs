//! End-to-end tests of the `cf-ols` binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

const REFERENCE_CSV: &str = "\
id,treatment,outcome,covariate
1,0,2.1,1
2,1,6.3,2
3,0,3.4,3
4,1,7.9,4
5,1,9.2,6
";

/// Per-test scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cf-ols-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cf_ols() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cf-ols"))
}

#[test]
fn test_text_report_written() {
    let dir = scratch_dir("text");
    let input = dir.join("data.csv");
    let output = dir.join("results.txt");
    let log = dir.join("app.log");
    fs::write(&input, REFERENCE_CSV).unwrap();

    let out = cf_ols()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--log-file")
        .arg(&log)
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Execution time:"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Mean Observed Outcome: 5.78000"));
    assert!(text.contains("Mean Counterfactual Outcome (Treatment = 1): 7.23200"));
    assert!(text.contains("Mean Counterfactual Outcome (Treatment = 0): 3.60200"));
    assert!(text.contains("treatment      3.6300"));
    assert!(text.contains("on 2 and 2 DF"));

    let log_text = fs::read_to_string(&log).unwrap();
    assert!(log_text.contains("model fitted"));
    assert!(log_text.contains("results written"));
}

#[test]
fn test_json_report_with_textbook_rss() {
    let dir = scratch_dir("json");
    let input = dir.join("data.csv");
    let output = dir.join("results.json");
    fs::write(&input, REFERENCE_CSV).unwrap();

    let out = cf_ols()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--log-file")
        .arg(dir.join("app.log"))
        .args(["--format", "json", "--solver", "qr", "--rss-formula", "sum-of-squares"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["n_observations"].as_u64(), Some(5));
    assert_eq!(value["rss_formula"], "sum-of-squares");

    let rss = value["rss"].as_f64().unwrap();
    assert!((rss - 0.024).abs() < 1e-9);
    let beta1 = value["coefficients"][1].as_f64().unwrap();
    assert!((beta1 - 3.63).abs() < 1e-9);
}

#[test]
fn test_singular_data_fails() {
    let dir = scratch_dir("singular");
    let input = dir.join("data.csv");
    let output = dir.join("results.txt");
    fs::write(
        &input,
        "id,treatment,outcome,covariate\n1,0,1.0,0\n2,1,2.5,2\n3,0,1.2,0\n4,1,2.9,2\n5,1,3.1,2\n",
    )
    .unwrap();

    let out = cf_ols()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--log-file")
        .arg(dir.join("app.log"))
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("singular"));
    assert!(!output.exists());
}

#[test]
fn test_malformed_row_reports_line() {
    let dir = scratch_dir("malformed");
    let input = dir.join("data.csv");
    fs::write(
        &input,
        "id,treatment,outcome,covariate\n1,0,2.1,1\n2,1,abc,2\n3,0,3.4,3\n4,1,7.9,4\n",
    )
    .unwrap();

    let out = cf_ols()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.join("results.txt"))
        .arg("--log-file")
        .arg(dir.join("app.log"))
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
    assert!(stderr.contains("outcome"), "stderr: {stderr}");
}

#[test]
fn test_missing_input_file() {
    let dir = scratch_dir("missing");

    let out = cf_ols()
        .arg("--input")
        .arg(dir.join("nope.csv"))
        .arg("--output")
        .arg(dir.join("results.txt"))
        .arg("--log-file")
        .arg(dir.join("app.log"))
        .output()
        .unwrap();

    assert!(!out.status.success());
}

#[test]
fn test_rejects_bad_rank_tolerance() {
    let dir = scratch_dir("tolerance");
    let input = dir.join("data.csv");
    fs::write(&input, REFERENCE_CSV).unwrap();

    let out = cf_ols()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.join("results.txt"))
        .arg("--log-file")
        .arg(dir.join("app.log"))
        .args(["--rank-tolerance", "2.0"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid fit options"));
}
