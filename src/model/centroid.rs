use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::math::stats::{mean, std_dev};
use crate::model::{Predictor, validate_design};
use crate::vitals::HealthLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCentroid {
    pub label: HealthLabel,
    pub support: usize,
    pub center: Vec<f64>,
}

/// Nearest-centroid classifier over z-scored features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidClassifier {
    pub feature_names: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub centroids: Vec<LabelCentroid>,
}

impl CentroidClassifier {
    pub fn fit(feature_names: &[&str], rows: &[Vec<f64>], labels: &[HealthLabel]) -> Result<Self> {
        let p = feature_names.len();
        validate_design(p, rows, labels.len())?;

        let mut means = Vec::with_capacity(p);
        let mut scales = Vec::with_capacity(p);
        for j in 0..p {
            let column: Vec<f64> = rows.iter().map(|r| r[j]).collect();
            let m = mean(&column);
            let s = std_dev(&column, m);
            means.push(m);
            // Constant columns carry no signal; keep them unscaled.
            scales.push(if s > 0.0 { s } else { 1.0 });
        }

        let mut centroids = Vec::new();
        for label in HealthLabel::ALL {
            let members: Vec<&Vec<f64>> = rows
                .iter()
                .zip(labels)
                .filter(|(_, l)| **l == label)
                .map(|(r, _)| r)
                .collect();
            if members.is_empty() {
                continue;
            }
            let center = (0..p)
                .map(|j| {
                    members
                        .iter()
                        .map(|r| (r[j] - means[j]) / scales[j])
                        .sum::<f64>()
                        / members.len() as f64
                })
                .collect();
            centroids.push(LabelCentroid {
                label,
                support: members.len(),
                center,
            });
        }

        Ok(Self {
            feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
            means,
            scales,
            centroids,
        })
    }

    pub fn predict_label(&self, row: &[f64]) -> Result<HealthLabel> {
        if row.len() != self.means.len() {
            bail!("expected {} features, got {}", self.means.len(), row.len());
        }
        let z: Vec<f64> = row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(x, (m, s))| (x - m) / s)
            .collect();

        let mut best: Option<(HealthLabel, f64)> = None;
        for centroid in &self.centroids {
            let dist: f64 = centroid
                .center
                .iter()
                .zip(&z)
                .map(|(c, v)| (c - v) * (c - v))
                .sum();
            // Strict comparison keeps the earlier (less severe) label on ties.
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((centroid.label, dist));
            }
        }
        best.map(|(label, _)| label)
            .context("classifier has no centroids")
    }
}

impl Predictor for CentroidClassifier {
    fn name(&self) -> &'static str {
        "nearest_centroid"
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter()
            .map(|row| self.predict_label(row).map(HealthLabel::code))
            .collect()
    }
}
