use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TrendResult;

/// Direction of the most recent period-over-period move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightTrend {
    Rising,
    Falling,
    Stable,
}

impl InsightTrend {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.0 {
            InsightTrend::Rising
        } else if change_percent < 0.0 {
            InsightTrend::Falling
        } else {
            InsightTrend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightTrend::Rising => "rising",
            InsightTrend::Falling => "falling",
            InsightTrend::Stable => "stable",
        }
    }
}

/// Severity label attached to a percent change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Low,
    Medium,
    High,
    Critical,
}

impl Significance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Significance::Low => "low",
            Significance::Medium => "medium",
            Significance::High => "high",
            Significance::Critical => "critical",
        }
    }
}

/// Narrative insight about a single indicator's latest move.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicInsight {
    pub indicator_name: String,
    pub category: String,
    pub source: String,

    /// Date of `current_value`
    pub as_of: NaiveDate,
    pub current_value: f64,
    pub previous_value: f64,

    /// Percent change from previous to current. Infinite when the previous value
    /// is zero; serialized as `null` in that case.
    pub change_percent: f64,
    pub trend: InsightTrend,
    pub significance: Significance,
    pub narrative: String,
    pub investment_implication: String,
    pub historical_context: String,
    pub related_indicators: Vec<String>,
    pub trend_analysis: TrendResult,
}
