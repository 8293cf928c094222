use anyhow::{Context, Result};

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let report = ctx.report.as_ref().context("report missing")?;
    let counts = &report.dataset.label_counts;

    let mut out = String::new();
    out.push_str(&format!("{} v{}\n", report.tool, report.version));
    out.push_str(&format!(
        "Dataset: {} samples, seed={}\n",
        report.dataset.samples, report.dataset.seed
    ));
    out.push_str(&format!(
        "Labels: normal={} warning={} critical={}\n",
        counts.normal, counts.warning, counts.critical
    ));
    out.push_str(&format!(
        "Mean risk: {:.2}\n",
        report.dataset.mean_risk_score
    ));

    if let Some(training) = &report.training {
        let m = &training.metrics;
        out.push_str(&format!(
            "Training: {} train / {} test rows\n",
            m.train_rows, m.test_rows
        ));
        out.push_str(&format!("Status accuracy: {:.4}\n", m.status_accuracy));
        for target in &m.targets {
            out.push_str(&format!("MSE {}: {:.4}\n", target.target, target.mse));
        }
        out.push_str(&format!(
            "BP model: intercept={:.4} coefficients={:?}\n",
            training.bp_model.intercept, training.bp_model.coefficients
        ));
    }

    out.push_str(&format!("Output: {}\n", ctx.output.out_dir.display()));
    Ok(out)
}
