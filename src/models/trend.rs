use serde::{Deserialize, Serialize};

/// Direction of the net move across a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

/// Trend, momentum and volatility estimate for an ordered value sequence.
///
/// `strength` and `momentum` are on a 0-100 scale (momentum is signed).
/// `volatility` is the standard deviation of period-over-period percent changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub strength: f64,
    pub momentum: f64,
    pub duration: usize,
    pub volatility: f64,
}

impl TrendResult {
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Sideways,
            strength: 0.0,
            momentum: 0.0,
            duration: 0,
            volatility: 0.0,
        }
    }
}
