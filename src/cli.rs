use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ctx::{DEFAULT_CALIBRATION_SAMPLES, DEFAULT_TEST_FRACTION};

#[derive(Debug, Parser)]
#[command(
    name = "maternal-vitals",
    version,
    about = "Maternal vital-sign synthesis, scoring and BP estimation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synthesize a labeled dataset
    Generate(GenerateArgs),
    /// Synthesize a dataset and fit the prediction models
    Train(TrainArgs),
    /// Score one set of vitals with the rule-based evaluator
    Evaluate(EvaluateArgs),
    /// Predict status, risk and next-day vitals from a trained bundle
    Forecast(ForecastArgs),
    /// Estimate systolic blood pressure; prints one JSON line
    EstimateBp(EstimateBpArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 10_000, help = "Number of samples to draw")]
    pub samples: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false, help = "Write dataset.json")]
    pub json: bool,

    #[arg(long, default_value_t = false, help = "Write dataset.tsv")]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    #[arg(long, default_value_t = 10_000, help = "Number of samples to draw")]
    pub samples: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_TEST_FRACTION,
        help = "Held-out fraction in [0, 1)"
    )]
    pub test_fraction: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_CALIBRATION_SAMPLES,
        help = "Rows in the BP calibration set"
    )]
    pub calibration_samples: usize,

    #[arg(long, default_value_t = false, help = "Also write dataset.tsv")]
    pub tsv: bool,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct VitalArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub heart_rate: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub spo2: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub temperature: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub blood_pressure: f64,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub vitals: VitalArgs,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    #[arg(long, help = "Path to health_models.json")]
    pub models: PathBuf,

    #[command(flatten)]
    pub vitals: VitalArgs,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
    pub pregnancy_week: u8,
}

/// Vitals are taken as raw strings so that bad numbers are reported in the
/// JSON error line instead of by the argument parser.
#[derive(Debug, Args)]
pub struct EstimateBpArgs {
    #[arg(allow_hyphen_values = true)]
    pub heart_rate: String,

    #[arg(allow_hyphen_values = true)]
    pub spo2: String,

    #[arg(long, help = "BP model artifact (default: bp_model.json next to the binary)")]
    pub model: Option<PathBuf>,
}
