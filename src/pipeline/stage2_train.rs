use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::math::stats::mse;
use crate::model::bundle::HealthModels;
use crate::model::{Predictor, train_bp_model};
use crate::pipeline::Stage;
use crate::synth;

pub struct Stage2Train;

impl Stage2Train {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Train {
    fn name(&self) -> &'static str {
        "stage2_train"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = ctx.dataset.as_ref().context("dataset missing")?;
        let (models, metrics) = HealthModels::train(dataset, ctx.test_fraction, ctx.seed)?;
        info!(
            train_rows = metrics.train_rows,
            test_rows = metrics.test_rows,
            accuracy = metrics.status_accuracy,
            "health_models_ready"
        );

        let calibration = synth::bp_calibration(ctx.calibration_samples, ctx.seed)?;
        let bp_model = train_bp_model(&calibration).context("failed to fit bp model")?;
        let rows: Vec<Vec<f64>> = calibration
            .iter()
            .map(|r| vec![r.heart_rate, r.spo2])
            .collect();
        let actual: Vec<f64> = calibration.iter().map(|r| r.bp).collect();
        let bp_mse = mse(&bp_model.predict(&rows)?, &actual)?;
        info!(
            rows = calibration.len(),
            mse = bp_mse,
            "bp_model_ready"
        );

        if metrics.status_accuracy < 0.5 {
            ctx.warnings.push(format!(
                "status classifier accuracy is low: {:.3}",
                metrics.status_accuracy
            ));
        }

        ctx.health_models = Some(models);
        ctx.training_metrics = Some(metrics);
        ctx.bp_model = Some(bp_model);
        ctx.bp_train_mse = Some(bp_mse);
        ctx.calibration = Some(calibration);
        Ok(())
    }
}
