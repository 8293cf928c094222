use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod json_writer;
pub mod summary;
pub mod tsv_writer;

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

/// Writes `value` as one compact JSON line.
pub fn write_json_line<T: Serialize, W: Write>(mut out: W, value: &T) -> Result<()> {
    let line = serde_json::to_string(value)?;
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}
