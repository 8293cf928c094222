use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{self, json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage3Output;

impl Stage3Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Output {
    fn name(&self) -> &'static str {
        "stage3_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = ctx.dataset.as_ref().context("dataset missing")?;

        if ctx.write_tsv {
            tsv_writer::write_dataset_tsv(&ctx.output.dataset_tsv, dataset)?;
        }
        if ctx.write_json {
            io::write_json(&ctx.output.dataset_json, &dataset.records())?;
        }
        if let Some(models) = &ctx.health_models {
            io::write_json(&ctx.output.health_models, models)?;
        }
        if let Some(bp_model) = &ctx.bp_model {
            io::write_json(&ctx.output.bp_model, bp_model)?;
        }

        let report = json_writer::build_report(ctx)?;
        io::write_json(&ctx.output.report_json, &report)?;
        ctx.report = Some(report);

        info!(out_dir = %ctx.output.out_dir.display(), "stage3_output_ready");
        Ok(())
    }
}
