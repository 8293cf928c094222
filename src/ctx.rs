use std::path::PathBuf;

use crate::model::bundle::{HealthModels, TrainingMetrics};
use crate::model::linear::LinearModel;
use crate::schema::v1::VitalsReportV1;
use crate::synth::{BpCalibrationRow, TrainingDataset};

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_CALIBRATION_SAMPLES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Generate,
    Train,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub dataset_tsv: PathBuf,
    pub dataset_json: PathBuf,
    pub report_json: PathBuf,
    pub health_models: PathBuf,
    pub bp_model: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            dataset_tsv: out_dir.join("dataset.tsv"),
            dataset_json: out_dir.join("dataset.json"),
            report_json: out_dir.join("report.json"),
            health_models: out_dir.join("health_models.json"),
            bp_model: out_dir.join("bp_model.json"),
            out_dir,
        }
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub kind: RunKind,
    pub samples: usize,
    pub seed: u64,
    pub test_fraction: f64,
    pub calibration_samples: usize,
    pub write_json: bool,
    pub write_tsv: bool,
    pub tool_version: String,
    pub dataset: Option<TrainingDataset>,
    pub calibration: Option<Vec<BpCalibrationRow>>,
    pub health_models: Option<HealthModels>,
    pub training_metrics: Option<TrainingMetrics>,
    pub bp_model: Option<LinearModel>,
    pub bp_train_mse: Option<f64>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: Option<VitalsReportV1>,
}

impl Ctx {
    pub fn new(
        kind: RunKind,
        samples: usize,
        seed: u64,
        out_dir: PathBuf,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        Self {
            kind,
            samples,
            seed,
            test_fraction: DEFAULT_TEST_FRACTION,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            write_json,
            write_tsv,
            tool_version: tool_version.to_string(),
            dataset: None,
            calibration: None,
            health_models: None,
            training_metrics: None,
            bp_model: None,
            bp_train_mse: None,
            warnings: Vec::new(),
            output: OutputPaths::new(out_dir),
            report: None,
        }
    }
}
