pub mod bp;
pub mod health;

use serde::{Deserialize, Serialize};

use crate::vitals::HealthLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn points(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    HeartRate,
    Spo2,
    Temperature,
    BloodPressure,
}

impl VitalKind {
    pub const ALL: [VitalKind; 4] = [
        Self::HeartRate,
        Self::Spo2,
        Self::Temperature,
        Self::BloodPressure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::Spo2 => "spo2",
            Self::Temperature => "temperature",
            Self::BloodPressure => "blood_pressure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalScore {
    pub vital: VitalKind,
    pub value: f64,
    pub severity: Severity,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub label: HealthLabel,
    pub total: u8,
    pub risk_score: f64,
    pub vitals: Vec<VitalScore>,
}
