use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::math::stats::mean;
use crate::schema::v1::{
    BpModelSummary, DatasetSummary, LabelCounts, OutputFiles, SCHEMA_VERSION, TOOL_NAME,
    TrainingSummary, VitalsReportV1,
};
use crate::vitals::HealthLabel;

pub fn build_report(ctx: &Ctx) -> Result<VitalsReportV1> {
    let dataset = ctx.dataset.as_ref().context("dataset missing")?;

    let counts = dataset.label_counts();
    let count = |label: HealthLabel| counts.get(&label).copied().unwrap_or(0) as u64;
    let risks: Vec<f64> = dataset
        .rows()
        .iter()
        .map(|r| r.assessment().risk_score)
        .collect();

    let dataset_summary = DatasetSummary {
        samples: dataset.len() as u64,
        seed: ctx.seed,
        label_counts: LabelCounts {
            normal: count(HealthLabel::Normal),
            warning: count(HealthLabel::Warning),
            critical: count(HealthLabel::Critical),
        },
        mean_risk_score: mean(&risks),
    };

    let training = match (&ctx.training_metrics, &ctx.bp_model) {
        (Some(metrics), Some(bp_model)) => Some(TrainingSummary {
            test_fraction: ctx.test_fraction,
            metrics: metrics.clone(),
            bp_model: BpModelSummary {
                calibration_rows: ctx.calibration.as_ref().map_or(0, |c| c.len()) as u64,
                intercept: bp_model.intercept,
                coefficients: bp_model.coefficients.clone(),
                train_mse: ctx.bp_train_mse.unwrap_or(0.0),
            },
        }),
        _ => None,
    };

    let files = OutputFiles {
        dataset_tsv: ctx.write_tsv.then(|| file_name(&ctx.output.dataset_tsv)),
        dataset_json: ctx.write_json.then(|| file_name(&ctx.output.dataset_json)),
        health_models: ctx
            .health_models
            .as_ref()
            .map(|_| file_name(&ctx.output.health_models)),
        bp_model: ctx.bp_model.as_ref().map(|_| file_name(&ctx.output.bp_model)),
    };

    Ok(VitalsReportV1 {
        tool: TOOL_NAME.to_string(),
        version: ctx.tool_version.clone(),
        schema_version: SCHEMA_VERSION.to_string(),
        dataset: dataset_summary,
        training,
        files,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
