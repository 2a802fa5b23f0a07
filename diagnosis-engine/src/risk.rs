//! Heuristic risk tier, independent of the classifier.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::FeatureVector;

const HIGH_RISK_MIN_SYMPTOMS: i64 = 3;
const MEDIUM_RISK_MIN_SYMPTOMS: i64 = 2;
const ELDERLY_AGE: i64 = 60;
const HIGH_BLOOD_PRESSURE: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk tier of an assembled patient row.
pub fn assess(features: &FeatureVector) -> RiskTier {
    classify(
        features.symptom_count(),
        features.age,
        features.blood_pressure,
    )
}

/// High needs three or more symptoms plus age over 60 or blood pressure
/// code 2. Two symptoms alone are medium.
pub fn classify(symptom_count: i64, age: i64, blood_pressure: i64) -> RiskTier {
    let vulnerable = age > ELDERLY_AGE || blood_pressure == HIGH_BLOOD_PRESSURE;
    if symptom_count >= HIGH_RISK_MIN_SYMPTOMS && vulnerable {
        RiskTier::High
    } else if symptom_count >= MEDIUM_RISK_MIN_SYMPTOMS {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
