use serde::{Deserialize, Serialize};

use crate::model::bundle::{Forecast, TrainingMetrics};
use crate::scores::HealthAssessment;

pub const TOOL_NAME: &str = "maternal-vitals";
pub const SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCounts {
    pub normal: u64,
    pub warning: u64,
    pub critical: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub samples: u64,
    pub seed: u64,
    pub label_counts: LabelCounts,
    pub mean_risk_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpModelSummary {
    pub calibration_rows: u64,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub train_mse: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub test_fraction: f64,
    pub metrics: TrainingMetrics,
    pub bp_model: BpModelSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFiles {
    pub dataset_tsv: Option<String>,
    pub dataset_json: Option<String>,
    pub health_models: Option<String>,
    pub bp_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub dataset: DatasetSummary,
    pub training: Option<TrainingSummary>,
    pub files: OutputFiles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpOutput {
    pub bp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutput {
    pub forecast: Forecast,
    pub rule_based: HealthAssessment,
}
