use std::fs;

use maternal_vitals::ctx::{Ctx, RunKind};
use maternal_vitals::io::json_writer::build_report;
use maternal_vitals::io::summary::format_summary;
use maternal_vitals::io::tsv_writer::write_dataset_tsv;
use maternal_vitals::pipeline::Pipeline;
use maternal_vitals::schema::v1::VitalsReportV1;
use maternal_vitals::scores::health::evaluate;
use maternal_vitals::synth::{TrainingDataset, TrainingRow, generate};
use maternal_vitals::vitals::{NextDayTargets, VitalSample};
use serde_json::Value;
use tempfile::TempDir;

fn make_ctx(kind: RunKind, out: &std::path::Path) -> Ctx {
    Ctx::new(kind, 100, 42, out.to_path_buf(), true, true, "0.0.0-test")
}

fn row(hr: f64, spo2: f64, temp: f64, bp: f64) -> TrainingRow {
    TrainingRow {
        sample: VitalSample {
            heart_rate: hr,
            spo2,
            temperature: temp,
            blood_pressure: bp,
            pregnancy_week: 20,
        },
        next_day: NextDayTargets {
            next_day_hr: hr,
            next_day_spo2: spo2,
            next_day_temp: temp,
            next_day_bp: bp,
        },
    }
}

#[test]
fn report_counts_labels() {
    let mut ctx = make_ctx(RunKind::Generate, std::path::Path::new("out"));
    ctx.dataset = Some(TrainingDataset::from_rows(vec![
        row(80.0, 98.0, 37.0, 120.0),
        row(130.0, 98.0, 37.0, 120.0),
        row(130.0, 85.0, 39.0, 170.0),
    ]));
    let report = build_report(&ctx).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tool"], "maternal-vitals");
    assert_eq!(json["version"], "0.0.0-test");
    assert_eq!(json["dataset"]["label_counts"]["normal"], 1);
    assert_eq!(json["dataset"]["label_counts"]["warning"], 1);
    assert_eq!(json["dataset"]["label_counts"]["critical"], 1);
    let expected = (0.0 + 25.0 + 100.0) / 3.0;
    assert!((report.dataset.mean_risk_score - expected).abs() < 1e-9);
    assert!(json["training"].is_null());
}

#[test]
fn report_requires_dataset() {
    let ctx = make_ctx(RunKind::Generate, std::path::Path::new("out"));
    assert!(build_report(&ctx).is_err());
}

#[test]
fn tsv_round_trips_vitals_exactly() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("dataset.tsv");
    let ds = generate(50, 42).unwrap();
    write_dataset_tsv(&path, &ds).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 51);
    for (line, orig) in lines[1..].iter().zip(ds.rows()) {
        let cols: Vec<&str> = line.split('\t').collect();
        assert_eq!(cols.len(), 11);
        let hr: f64 = cols[0].parse().unwrap();
        let spo2: f64 = cols[1].parse().unwrap();
        let temp: f64 = cols[2].parse().unwrap();
        let bp: f64 = cols[3].parse().unwrap();
        assert_eq!(hr, orig.sample.heart_rate);
        let a = evaluate(hr, spo2, temp, bp);
        assert_eq!(cols[5], a.label.as_str());
        assert_eq!(cols[6].parse::<f64>().unwrap(), a.risk_score);
    }
}

#[test]
fn pipeline_train_populates_ctx() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = Ctx::new(
        RunKind::Train,
        800,
        5,
        tmp.path().to_path_buf(),
        false,
        false,
        "0.0.0-test",
    );
    ctx.calibration_samples = 300;
    Pipeline::train().run(&mut ctx).unwrap();

    assert!(ctx.health_models.is_some());
    assert!(ctx.bp_model.is_some());
    assert!(tmp.path().join("health_models.json").exists());
    assert!(tmp.path().join("bp_model.json").exists());
    assert!(!tmp.path().join("dataset.tsv").exists());

    let report: VitalsReportV1 =
        serde_json::from_slice(&fs::read(tmp.path().join("report.json")).unwrap()).unwrap();
    let training = report.training.unwrap();
    assert_eq!(training.bp_model.calibration_rows, 300);
    assert_eq!(training.metrics.train_rows + training.metrics.test_rows, 800);

    let summary = format_summary(&ctx).unwrap();
    assert!(summary.contains("maternal-vitals v0.0.0-test"));
    assert!(summary.contains("Dataset: 800 samples, seed=5"));
    assert!(summary.contains("Status accuracy:"));
}

#[test]
fn generate_pipeline_skips_models() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = make_ctx(RunKind::Generate, tmp.path());
    Pipeline::generate().run(&mut ctx).unwrap();
    assert!(ctx.health_models.is_none());
    assert!(!tmp.path().join("bp_model.json").exists());

    let v: Value =
        serde_json::from_slice(&fs::read(tmp.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(v["dataset"]["samples"], 100);
    assert_eq!(v["files"]["dataset_json"], "dataset.json");
}
