//! Seeded synthetic maternal vitals.
//!
//! Every draw goes through a `ChaCha20Rng` built from the caller's seed, so a
//! `(n, seed)` pair always yields the same dataset. Draw order is column-wise:
//! all base values of one vital before the next.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{VitalsError, VitalsResult};
use crate::scores::HealthAssessment;
use crate::scores::health::evaluate_sample;
use crate::vitals::{HealthLabel, NextDayTargets, VitalSample};

const MID_PREGNANCY_WEEK: f64 = 20.0;
const HR_DRIFT_PER_WEEK: f64 = 0.5;
const SPO2_DRIFT_PER_WEEK: f64 = -0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub sample: VitalSample,
    pub next_day: NextDayTargets,
}

impl TrainingRow {
    pub fn assessment(&self) -> HealthAssessment {
        evaluate_sample(&self.sample)
    }

    /// Flat export record. Label and risk are recomputed from the sample.
    pub fn record(&self) -> DatasetRecord {
        let assessment = self.assessment();
        DatasetRecord {
            heart_rate: self.sample.heart_rate,
            spo2: self.sample.spo2,
            temperature: self.sample.temperature,
            blood_pressure: self.sample.blood_pressure,
            pregnancy_week: self.sample.pregnancy_week,
            health_status: assessment.label,
            risk_score: assessment.risk_score,
            next_day_hr: self.next_day.next_day_hr,
            next_day_spo2: self.next_day.next_day_spo2,
            next_day_temp: self.next_day.next_day_temp,
            next_day_bp: self.next_day.next_day_bp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub blood_pressure: f64,
    pub pregnancy_week: u8,
    pub health_status: HealthLabel,
    pub risk_score: f64,
    pub next_day_hr: f64,
    pub next_day_spo2: f64,
    pub next_day_temp: f64,
    pub next_day_bp: f64,
}

pub const DATASET_COLUMNS: [&str; 11] = [
    "heart_rate",
    "spo2",
    "temperature",
    "blood_pressure",
    "pregnancy_week",
    "health_status",
    "risk_score",
    "next_day_hr",
    "next_day_spo2",
    "next_day_temp",
    "next_day_bp",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    rows: Vec<TrainingRow>,
}

impl TrainingDataset {
    pub fn from_rows(rows: Vec<TrainingRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> Vec<DatasetRecord> {
        self.rows.iter().map(TrainingRow::record).collect()
    }

    pub fn label_counts(&self) -> BTreeMap<HealthLabel, usize> {
        let mut counts: BTreeMap<HealthLabel, usize> =
            HealthLabel::ALL.iter().map(|&label| (label, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.assessment().label).or_default() += 1;
        }
        counts
    }
}

pub fn generate(n: usize, seed: u64) -> VitalsResult<TrainingDataset> {
    ensure_samples(n)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let base_hr = normal_column(&mut rng, 85.0, 15.0, n)?;
    let base_spo2 = normal_column(&mut rng, 97.0, 2.0, n)?;
    let base_temp = normal_column(&mut rng, 37.0, 0.5, n)?;
    let base_bp = normal_column(&mut rng, 110.0, 15.0, n)?;
    let weeks: Vec<u8> = (0..n).map(|_| rng.gen_range(1..=40u8)).collect();

    let hr_noise = normal_column(&mut rng, 0.0, 5.0, n)?;
    let spo2_noise = normal_column(&mut rng, 0.0, 1.0, n)?;
    let temp_noise = normal_column(&mut rng, 0.0, 0.3, n)?;
    let bp_noise = normal_column(&mut rng, 0.0, 10.0, n)?;

    let next_hr_noise = normal_column(&mut rng, 0.0, 3.0, n)?;
    let next_spo2_noise = normal_column(&mut rng, 0.0, 1.0, n)?;
    let next_temp_noise = normal_column(&mut rng, 0.0, 0.2, n)?;
    let next_bp_noise = normal_column(&mut rng, 0.0, 5.0, n)?;

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let week_offset = weeks[i] as f64 - MID_PREGNANCY_WEEK;
        let sample = VitalSample {
            heart_rate: base_hr[i] + week_offset * HR_DRIFT_PER_WEEK + hr_noise[i],
            spo2: base_spo2[i] + week_offset * SPO2_DRIFT_PER_WEEK + spo2_noise[i],
            temperature: base_temp[i] + temp_noise[i],
            blood_pressure: base_bp[i] + bp_noise[i],
            pregnancy_week: weeks[i],
        };
        let next_day = NextDayTargets {
            next_day_hr: sample.heart_rate + next_hr_noise[i],
            next_day_spo2: sample.spo2 + next_spo2_noise[i],
            next_day_temp: sample.temperature + next_temp_noise[i],
            next_day_bp: sample.blood_pressure + next_bp_noise[i],
        };
        rows.push(TrainingRow { sample, next_day });
    }

    Ok(TrainingDataset { rows })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpCalibrationRow {
    pub heart_rate: f64,
    pub spo2: f64,
    pub bp: f64,
}

/// Calibration table for the blood-pressure regression:
/// `bp = 0.5 * hr + 0.8 * spo2 + N(0, 5)` over resting-range vitals.
pub fn bp_calibration(n: usize, seed: u64) -> VitalsResult<Vec<BpCalibrationRow>> {
    ensure_samples(n)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let heart_rates: Vec<f64> = (0..n).map(|_| rng.gen_range(60..120) as f64).collect();
    let spo2s: Vec<f64> = (0..n).map(|_| rng.gen_range(92.0..100.0)).collect();
    let noise = normal_column(&mut rng, 0.0, 5.0, n)?;

    Ok(heart_rates
        .into_iter()
        .zip(spo2s)
        .zip(noise)
        .map(|((heart_rate, spo2), eps)| BpCalibrationRow {
            heart_rate,
            spo2,
            bp: 0.5 * heart_rate + 0.8 * spo2 + eps,
        })
        .collect())
}

fn ensure_samples(n: usize) -> VitalsResult<()> {
    if n < 1 {
        return Err(VitalsError::InvalidInput(
            "sample count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn normal_column(
    rng: &mut ChaCha20Rng,
    mean: f64,
    std_dev: f64,
    n: usize,
) -> VitalsResult<Vec<f64>> {
    let dist = Normal::new(mean, std_dev)?;
    Ok((0..n).map(|_| dist.sample(&mut *rng)).collect())
}
