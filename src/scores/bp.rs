use std::path::Path;

use tracing::debug;

use crate::error::{VitalsError, VitalsResult};
use crate::io;
use crate::math::stats::round_to;
use crate::model::Predictor;
use crate::model::linear::LinearModel;

pub const BP_BASELINE: f64 = 120.0;
pub const BP_MIN: f64 = 80.0;
pub const BP_MAX: f64 = 180.0;

/// Closed-form systolic estimate used whenever no trained model answers.
pub fn simple_bp_prediction(heart_rate: f64, spo2: f64) -> f64 {
    let hr_adjustment = if heart_rate > 100.0 {
        (heart_rate - 100.0) * 0.8
    } else if heart_rate < 60.0 {
        (60.0 - heart_rate) * 0.5
    } else {
        0.0
    };
    let spo2_adjustment = if spo2 < 95.0 {
        (95.0 - spo2) * 2.0
    } else {
        0.0
    };

    let systolic = (BP_BASELINE + hr_adjustment + spo2_adjustment).clamp(BP_MIN, BP_MAX);
    round_to(systolic, 1)
}

/// Two-tier systolic estimator: trained model first, rule second.
///
/// Model failures never reach the caller; only invalid vitals do.
pub struct BloodPressureEstimator {
    model: Option<Box<dyn Predictor>>,
}

impl BloodPressureEstimator {
    pub fn rule_based() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Box<dyn Predictor>) -> Self {
        Self { model: Some(model) }
    }

    /// Loads a `LinearModel` artifact. Missing or unreadable artifacts leave
    /// the estimator on the rule-based tier.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "bp model artifact not found");
            return Self::rule_based();
        }
        match io::read_json::<LinearModel>(path) {
            Ok(model) => {
                debug!(path = %path.display(), "bp model loaded");
                Self::with_model(Box::new(model))
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "bp model unavailable");
                Self::rule_based()
            }
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn estimate(&self, heart_rate: f64, spo2: f64) -> VitalsResult<f64> {
        ensure_positive("heart_rate", heart_rate)?;
        ensure_positive("spo2", spo2)?;

        if let Some(model) = &self.model {
            match predict_single(model.as_ref(), heart_rate, spo2) {
                Ok(bp) => return Ok(round_to(bp, 2)),
                Err(err) => {
                    debug!(model = model.name(), error = %err, "bp model failed, using rule");
                }
            }
        }
        Ok(simple_bp_prediction(heart_rate, spo2))
    }
}

fn predict_single(model: &dyn Predictor, heart_rate: f64, spo2: f64) -> VitalsResult<f64> {
    let out = model
        .predict(&[vec![heart_rate, spo2]])
        .map_err(|err| VitalsError::Model(err.to_string()))?;
    match out.first().copied() {
        Some(bp) if bp.is_finite() => Ok(bp),
        Some(bp) => Err(VitalsError::Model(format!("non-finite prediction {}", bp))),
        None => Err(VitalsError::Model("empty prediction".to_string())),
    }
}

fn ensure_positive(name: &str, value: f64) -> VitalsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VitalsError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}
