//! Small statistical helpers shared by the trainers and reports.

use anyhow::{Result, bail};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64], mean_val: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values
        .iter()
        .map(|v| (v - mean_val) * (v - mean_val))
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}

pub fn mse(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    if predicted.len() != actual.len() {
        bail!(
            "prediction length mismatch: {} != {}",
            predicted.len(),
            actual.len()
        );
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a) * (p - a))
        .sum();
    Ok(sum / predicted.len() as f64)
}

pub fn accuracy<T: PartialEq>(predicted: &[T], actual: &[T]) -> Result<f64> {
    if predicted.len() != actual.len() {
        bail!(
            "prediction length mismatch: {} != {}",
            predicted.len(),
            actual.len()
        );
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }
    let hits = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();
    Ok(hits as f64 / predicted.len() as f64)
}

/// Rounds on the exact decimal expansion of `value`, ties to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
