use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn generate_writes_dataset_and_report() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args(["generate", "--samples", "200", "--seed", "7", "--json", "--tsv", "--out"])
        .arg(out.path());
    cmd.assert().success();

    let tsv = fs::read_to_string(out.path().join("dataset.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 201);
    assert_eq!(
        lines[0],
        "heart_rate\tspo2\ttemperature\tblood_pressure\tpregnancy_week\thealth_status\trisk_score\tnext_day_hr\tnext_day_spo2\tnext_day_temp\tnext_day_bp"
    );

    let records: Value =
        serde_json::from_slice(&fs::read(out.path().join("dataset.json")).unwrap()).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 200);

    let report: Value =
        serde_json::from_slice(&fs::read(out.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(report["tool"], "maternal-vitals");
    assert_eq!(report["schema_version"], "v1");
    assert_eq!(report["dataset"]["samples"], 200);
    assert_eq!(report["dataset"]["seed"], 7);
    assert!(report["training"].is_null());
    assert_eq!(report["files"]["dataset_tsv"], "dataset.tsv");
}

#[test]
fn generate_is_reproducible_across_runs() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    for dir in [&a, &b] {
        let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
        cmd.args(["generate", "--samples", "300", "--seed", "42", "--tsv", "--out"])
            .arg(dir.path());
        cmd.assert().success();
    }
    let ta = fs::read(a.path().join("dataset.tsv")).unwrap();
    let tb = fs::read(b.path().join("dataset.tsv")).unwrap();
    assert_eq!(ta, tb);
}

#[test]
fn generate_rejects_zero_samples() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args(["generate", "--samples", "0", "--out"]).arg(out.path());
    cmd.assert().failure();
}

#[test]
fn train_then_estimate_and_forecast() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args(["train", "--samples", "1500", "--seed", "3", "--out"])
        .arg(out.path());
    cmd.assert().success();

    let report: Value =
        serde_json::from_slice(&fs::read(out.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(report["training"]["metrics"]["train_rows"], 1200);
    assert_eq!(report["files"]["bp_model"], "bp_model.json");

    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args(["estimate-bp", "90", "96", "--model"])
        .arg(out.path().join("bp_model.json"));
    let res = cmd.output().unwrap();
    assert!(res.status.success());
    let v: Value = serde_json::from_slice(&res.stdout).unwrap();
    let bp = v["bp"].as_f64().unwrap();
    assert!((bp - (0.5 * 90.0 + 0.8 * 96.0)).abs() < 3.0, "bp {}", bp);

    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args(["forecast", "--models"])
        .arg(out.path().join("health_models.json"))
        .args([
            "--heart-rate",
            "80",
            "--spo2",
            "98",
            "--temperature",
            "37",
            "--blood-pressure",
            "115",
            "--pregnancy-week",
            "24",
        ]);
    let res = cmd.output().unwrap();
    assert!(res.status.success());
    let v: Value = serde_json::from_slice(&res.stdout).unwrap();
    assert!(v["forecast"]["health_status"].is_string());
    assert_eq!(v["rule_based"]["label"], "Normal");
}

#[test]
fn evaluate_prints_assessment() {
    let mut cmd = Command::cargo_bin("maternal-vitals").unwrap();
    cmd.args([
        "evaluate",
        "--heart-rate",
        "130",
        "--spo2",
        "98",
        "--temperature",
        "37",
        "--blood-pressure",
        "115",
    ]);
    let res = cmd.output().unwrap();
    assert!(res.status.success());
    let v: Value = serde_json::from_slice(&res.stdout).unwrap();
    assert_eq!(v["label"], "Warning");
    assert_eq!(v["total"], 3);
    assert_eq!(v["risk_score"].as_f64().unwrap(), 25.0);
}
