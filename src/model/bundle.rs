use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::VitalsError;
use crate::math::stats::{accuracy, mse};
use crate::model::Predictor;
use crate::model::centroid::CentroidClassifier;
use crate::model::linear::LinearModel;
use crate::synth::{TrainingDataset, TrainingRow};
use crate::vitals::{HealthLabel, NextDayTargets, SAMPLE_FEATURES, VitalSample};

pub const BUNDLE_SCHEMA_VERSION: &str = "v1";

/// Health-status classifier, risk regressor and next-day regressors trained
/// on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthModels {
    pub schema_version: String,
    pub feature_names: Vec<String>,
    pub status: CentroidClassifier,
    pub risk: LinearModel,
    pub next_day_hr: LinearModel,
    pub next_day_spo2: LinearModel,
    pub next_day_temp: LinearModel,
    pub next_day_bp: LinearModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatedOn {
    Test,
    Train,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMetric {
    pub target: String,
    pub mse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub train_rows: usize,
    pub test_rows: usize,
    pub evaluated_on: EvaluatedOn,
    pub status_accuracy: f64,
    pub targets: Vec<TargetMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub health_status: HealthLabel,
    pub risk_score: f64,
    pub next_day: NextDayTargets,
}

type TargetFn = fn(&TrainingRow) -> f64;

const REGRESSION_TARGETS: [(&str, TargetFn); 5] = [
    ("risk_score", |r: &TrainingRow| r.assessment().risk_score),
    ("next_day_hr", |r: &TrainingRow| r.next_day.next_day_hr),
    ("next_day_spo2", |r: &TrainingRow| r.next_day.next_day_spo2),
    ("next_day_temp", |r: &TrainingRow| r.next_day.next_day_temp),
    ("next_day_bp", |r: &TrainingRow| r.next_day.next_day_bp),
];

impl HealthModels {
    /// Shuffles the rows with `seed`, holds out `test_fraction` of them and
    /// fits every model on the rest.
    pub fn train(
        dataset: &TrainingDataset,
        test_fraction: f64,
        seed: u64,
    ) -> Result<(Self, TrainingMetrics)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(VitalsError::InvalidInput(format!(
                "test fraction must be in [0, 1), got {}",
                test_fraction
            ))
            .into());
        }

        let mut indices: Vec<usize> = (0..dataset.len()).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_test = (dataset.len() as f64 * test_fraction).round() as usize;
        let (test_idx, train_idx) = indices.split_at(n_test);
        if train_idx.len() <= SAMPLE_FEATURES.len() {
            bail!(
                "need more than {} training rows, got {}",
                SAMPLE_FEATURES.len(),
                train_idx.len()
            );
        }

        let rows = dataset.rows();
        let train: Vec<&TrainingRow> = train_idx.iter().map(|&i| &rows[i]).collect();
        let (eval, evaluated_on) = if test_idx.is_empty() {
            (train.clone(), EvaluatedOn::Train)
        } else {
            (
                test_idx.iter().map(|&i| &rows[i]).collect::<Vec<_>>(),
                EvaluatedOn::Test,
            )
        };

        let train_x = features(&train);
        let eval_x = features(&eval);

        let train_labels: Vec<HealthLabel> = train.iter().map(|r| r.assessment().label).collect();
        let status = CentroidClassifier::fit(&SAMPLE_FEATURES, &train_x, &train_labels)
            .context("failed to fit status classifier")?;

        let mut regressors = Vec::with_capacity(REGRESSION_TARGETS.len());
        let mut targets = Vec::with_capacity(REGRESSION_TARGETS.len());
        for (name, target_fn) in REGRESSION_TARGETS {
            let y: Vec<f64> = train.iter().map(|r| target_fn(r)).collect();
            let model = LinearModel::fit(&SAMPLE_FEATURES, &train_x, &y)
                .with_context(|| format!("failed to fit {} regressor", name))?;
            let predicted = model.predict(&eval_x)?;
            let actual: Vec<f64> = eval.iter().map(|r| target_fn(r)).collect();
            let err = mse(&predicted, &actual)?;
            info!(target = name, mse = err, "regressor fitted");
            targets.push(TargetMetric {
                target: name.to_string(),
                mse: err,
            });
            regressors.push(model);
        }

        let predicted_labels = eval_x
            .iter()
            .map(|row| status.predict_label(row))
            .collect::<Result<Vec<_>>>()?;
        let actual_labels: Vec<HealthLabel> = eval.iter().map(|r| r.assessment().label).collect();
        let status_accuracy = accuracy(&predicted_labels, &actual_labels)?;
        info!(accuracy = status_accuracy, "status classifier fitted");

        let mut regressors = regressors.into_iter();
        let mut next = || regressors.next().context("missing regressor");
        let models = Self {
            schema_version: BUNDLE_SCHEMA_VERSION.to_string(),
            feature_names: SAMPLE_FEATURES.iter().map(|s| s.to_string()).collect(),
            status,
            risk: next()?,
            next_day_hr: next()?,
            next_day_spo2: next()?,
            next_day_temp: next()?,
            next_day_bp: next()?,
        };

        let metrics = TrainingMetrics {
            train_rows: train.len(),
            test_rows: test_idx.len(),
            evaluated_on,
            status_accuracy,
            targets,
        };
        Ok((models, metrics))
    }

    pub fn forecast(&self, sample: &VitalSample) -> Result<Forecast> {
        if self.schema_version != BUNDLE_SCHEMA_VERSION {
            bail!(
                "unsupported model bundle schema {}, expected {}",
                self.schema_version,
                BUNDLE_SCHEMA_VERSION
            );
        }
        let x = sample.features();
        Ok(Forecast {
            health_status: self.status.predict_label(&x)?,
            risk_score: self.risk.predict_row(&x)?.clamp(0.0, 100.0),
            next_day: NextDayTargets {
                next_day_hr: self.next_day_hr.predict_row(&x)?,
                next_day_spo2: self.next_day_spo2.predict_row(&x)?,
                next_day_temp: self.next_day_temp.predict_row(&x)?,
                next_day_bp: self.next_day_bp.predict_row(&x)?,
            },
        })
    }
}

fn features(rows: &[&TrainingRow]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| r.sample.features()).collect()
}
