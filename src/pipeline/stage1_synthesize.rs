use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::synth;

pub struct Stage1Synthesize;

impl Stage1Synthesize {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Synthesize {
    fn name(&self) -> &'static str {
        "stage1_synthesize"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = synth::generate(ctx.samples, ctx.seed)?;
        let counts = dataset.label_counts();
        info!(
            rows = dataset.len(),
            labels = ?counts,
            "dataset_ready"
        );
        ctx.dataset = Some(dataset);
        Ok(())
    }
}
