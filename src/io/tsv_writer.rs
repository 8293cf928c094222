use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::synth::{DATASET_COLUMNS, TrainingDataset};

pub fn write_dataset_tsv(path: &Path, dataset: &TrainingDataset) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_dataset(&mut w, dataset)?;
    w.flush()?;
    Ok(())
}

/// Floats are written in shortest round-trip form so a reader recovers the
/// exact sample values.
pub fn write_dataset<W: Write>(w: &mut W, dataset: &TrainingDataset) -> Result<()> {
    writeln!(w, "{}", DATASET_COLUMNS.join("\t"))?;
    for record in dataset.records() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.heart_rate,
            record.spo2,
            record.temperature,
            record.blood_pressure,
            record.pregnancy_week,
            record.health_status,
            record.risk_score,
            record.next_day_hr,
            record.next_day_spo2,
            record.next_day_temp,
            record.next_day_bp
        )?;
    }
    Ok(())
}
