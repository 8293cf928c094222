//! Rule-based health scoring.
//!
//! Each vital is matched against an ordered list of bands, most severe first.
//! The first band that matches decides the vital's severity; a value that
//! matches no band is normal. Points from the four vitals add up to a total in
//! `0..=12` which maps to a label and a 0-100 risk score.

use crate::scores::{HealthAssessment, Severity, VitalKind, VitalScore};
use crate::vitals::{HealthLabel, VitalSample};

pub const MAX_TOTAL: u8 = 12;

/// Upper bound of the Normal label band (inclusive).
pub const NORMAL_MAX_TOTAL: u8 = 1;
/// Upper bound of the Warning label band (inclusive).
pub const WARNING_MAX_TOTAL: u8 = 5;

/// A severity band fires when the value is strictly below `low` or strictly
/// above `high`.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub severity: Severity,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Band {
    const fn outside(severity: Severity, low: f64, high: f64) -> Self {
        Self {
            severity,
            low: Some(low),
            high: Some(high),
        }
    }

    const fn below(severity: Severity, low: f64) -> Self {
        Self {
            severity,
            low: Some(low),
            high: None,
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        self.low.is_some_and(|low| value < low) || self.high.is_some_and(|high| value > high)
    }

    pub fn describe(&self) -> String {
        match (self.low, self.high) {
            (Some(low), Some(high)) => format!("<{} or >{}", low, high),
            (Some(low), None) => format!("<{}", low),
            (None, Some(high)) => format!(">{}", high),
            (None, None) => "never".to_string(),
        }
    }
}

const HEART_RATE_BANDS: [Band; 2] = [
    Band::outside(Severity::Critical, 50.0, 120.0),
    Band::outside(Severity::Warning, 60.0, 100.0),
];

const SPO2_BANDS: [Band; 2] = [
    Band::below(Severity::Critical, 90.0),
    Band::below(Severity::Warning, 95.0),
];

const TEMPERATURE_BANDS: [Band; 2] = [
    Band::outside(Severity::Critical, 36.0, 38.0),
    Band::outside(Severity::Warning, 36.5, 37.5),
];

const BLOOD_PRESSURE_BANDS: [Band; 2] = [
    Band::outside(Severity::Critical, 90.0, 160.0),
    Band::outside(Severity::Warning, 100.0, 140.0),
];

pub fn bands(kind: VitalKind) -> &'static [Band] {
    match kind {
        VitalKind::HeartRate => &HEART_RATE_BANDS,
        VitalKind::Spo2 => &SPO2_BANDS,
        VitalKind::Temperature => &TEMPERATURE_BANDS,
        VitalKind::BloodPressure => &BLOOD_PRESSURE_BANDS,
    }
}

pub fn severity(kind: VitalKind, value: f64) -> Severity {
    bands(kind)
        .iter()
        .find(|band| band.matches(value))
        .map(|band| band.severity)
        .unwrap_or(Severity::Normal)
}

pub fn label_for_total(total: u8) -> HealthLabel {
    if total <= NORMAL_MAX_TOTAL {
        HealthLabel::Normal
    } else if total <= WARNING_MAX_TOTAL {
        HealthLabel::Warning
    } else {
        HealthLabel::Critical
    }
}

pub fn risk_for_total(total: u8) -> f64 {
    total.min(MAX_TOTAL) as f64 * 100.0 / MAX_TOTAL as f64
}

pub fn evaluate(
    heart_rate: f64,
    spo2: f64,
    temperature: f64,
    blood_pressure: f64,
) -> HealthAssessment {
    let values = [heart_rate, spo2, temperature, blood_pressure];
    let vitals: Vec<VitalScore> = VitalKind::ALL
        .iter()
        .zip(values)
        .map(|(&vital, value)| {
            let severity = severity(vital, value);
            VitalScore {
                vital,
                value,
                severity,
                points: severity.points(),
            }
        })
        .collect();
    let total: u8 = vitals.iter().map(|v| v.points).sum();

    HealthAssessment {
        label: label_for_total(total),
        total,
        risk_score: risk_for_total(total),
        vitals,
    }
}

pub fn evaluate_sample(sample: &VitalSample) -> HealthAssessment {
    evaluate(
        sample.heart_rate,
        sample.spo2,
        sample.temperature,
        sample.blood_pressure,
    )
}

