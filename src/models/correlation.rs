use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    /// Classify the magnitude of a Pearson coefficient.
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= 0.8 {
            CorrelationStrength::VeryStrong
        } else if magnitude >= 0.6 {
            CorrelationStrength::Strong
        } else if magnitude >= 0.3 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::VeryStrong => "very strong",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    pub fn from_coefficient(r: f64) -> Self {
        if r >= 0.0 {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationDirection::Positive => "positive",
            CorrelationDirection::Negative => "negative",
        }
    }
}

/// Correlation result for one indicator pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationAnalysis {
    pub indicator_a_id: Uuid,
    pub indicator_b_id: Uuid,
    pub indicator_a_name: String,
    pub indicator_b_name: String,

    /// Pearson coefficient in [-1, 1]
    pub correlation_coeff: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,

    /// Always 0: series are aligned on identical dates only
    pub lag_days: i32,

    /// Confidence in (0, 100], rising with sample size and |r|
    pub confidence: f64,

    /// Number of aligned observations the coefficient was computed from
    pub sample_size: usize,
    pub narrative: String,
}
