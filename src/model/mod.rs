use anyhow::{Result, bail};

use crate::model::linear::LinearModel;
use crate::synth::BpCalibrationRow;
use crate::vitals::BP_FEATURES;

pub mod bundle;
pub mod centroid;
pub mod linear;

/// A trained, read-only model: one scalar per feature row.
pub trait Predictor: Send + Sync {
    fn name(&self) -> &'static str;
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>>;
}

pub fn train_bp_model(calibration: &[BpCalibrationRow]) -> Result<LinearModel> {
    let rows: Vec<Vec<f64>> = calibration
        .iter()
        .map(|r| vec![r.heart_rate, r.spo2])
        .collect();
    let targets: Vec<f64> = calibration.iter().map(|r| r.bp).collect();
    LinearModel::fit(&BP_FEATURES, &rows, &targets)
}

pub(crate) fn validate_design(n_features: usize, rows: &[Vec<f64>], n_targets: usize) -> Result<()> {
    if n_features == 0 {
        bail!("no features given");
    }
    if rows.is_empty() {
        bail!("no training rows");
    }
    if rows.len() != n_targets {
        bail!(
            "row/target length mismatch: {} != {}",
            rows.len(),
            n_targets
        );
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_features) {
        bail!(
            "row {} has {} features, expected {}",
            i,
            row.len(),
            n_features
        );
    }
    if rows.iter().flatten().any(|v| !v.is_finite()) {
        bail!("non-finite feature value in training rows");
    }
    Ok(())
}
