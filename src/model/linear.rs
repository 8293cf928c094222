use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::math::linalg::solve;
use crate::math::stats::mean;
use crate::model::{Predictor, validate_design};

/// Ordinary least squares regression with intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn fit(feature_names: &[&str], rows: &[Vec<f64>], targets: &[f64]) -> Result<Self> {
        let p = feature_names.len();
        validate_design(p, rows, targets.len())?;

        let x_mean: Vec<f64> = (0..p)
            .map(|j| mean(&rows.iter().map(|r| r[j]).collect::<Vec<_>>()))
            .collect();
        let y_mean = mean(targets);

        // Centered normal equations: (Xc^T Xc) beta = Xc^T yc.
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        for (row, &y) in rows.iter().zip(targets) {
            let yc = y - y_mean;
            for i in 0..p {
                let xi = row[i] - x_mean[i];
                xty[i] += xi * yc;
                for j in i..p {
                    xtx[i][j] += xi * (row[j] - x_mean[j]);
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                xtx[i][j] = xtx[j][i];
            }
        }

        let coefficients = solve(xtx, xty)?;
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Ok(Self {
            feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
            intercept,
            coefficients,
        })
    }

    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            bail!(
                "expected {} features, got {}",
                self.coefficients.len(),
                row.len()
            );
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(b, x)| b * x)
                .sum::<f64>())
    }
}

impl Predictor for LinearModel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
