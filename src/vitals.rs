use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature order shared by every model trained on full samples.
pub const SAMPLE_FEATURES: [&str; 5] = [
    "heart_rate",
    "spo2",
    "temperature",
    "blood_pressure",
    "pregnancy_week",
];

/// Feature order of the blood-pressure regression.
pub const BP_FEATURES: [&str; 2] = ["heart_rate", "spo2"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSample {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub blood_pressure: f64,
    pub pregnancy_week: u8,
}

impl VitalSample {
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.heart_rate,
            self.spo2,
            self.temperature,
            self.blood_pressure,
            self.pregnancy_week as f64,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextDayTargets {
    pub next_day_hr: f64,
    pub next_day_spo2: f64,
    pub next_day_temp: f64,
    pub next_day_bp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthLabel {
    Normal,
    Warning,
    Critical,
}

impl HealthLabel {
    pub const ALL: [HealthLabel; 3] = [Self::Normal, Self::Warning, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    /// Numeric code used when a label travels through a `Predictor`.
    pub fn code(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Warning => 1.0,
            Self::Critical => 2.0,
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
