use serde::{Deserialize, Serialize};

/// The five sub-scores of the economic health score, each in [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthComponents {
    pub labor_market: f64,
    pub inflation: f64,
    pub economic_growth: f64,
    pub fiscal_health: f64,
    pub market_conditions: f64,
}

impl HealthComponents {
    pub fn neutral() -> Self {
        Self {
            labor_market: NEUTRAL_SCORE,
            inflation: NEUTRAL_SCORE,
            economic_growth: NEUTRAL_SCORE,
            fiscal_health: NEUTRAL_SCORE,
            market_conditions: NEUTRAL_SCORE,
        }
    }

    /// Components paired with their display labels, in weight order.
    pub fn labelled(&self) -> [(&'static str, f64); 5] {
        [
            ("labor market", self.labor_market),
            ("inflation", self.inflation),
            ("economic growth", self.economic_growth),
            ("fiscal health", self.fiscal_health),
            ("market conditions", self.market_conditions),
        ]
    }
}

/// Sub-score used whenever an indicator is missing or lacks data.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Blend weights for the overall score. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScoreWeights {
    pub labor_market: f64,
    pub inflation: f64,
    pub economic_growth: f64,
    pub fiscal_health: f64,
    pub market_conditions: f64,
}

impl Default for HealthScoreWeights {
    fn default() -> Self {
        Self {
            labor_market: 0.25,
            inflation: 0.20,
            economic_growth: 0.25,
            fiscal_health: 0.15,
            market_conditions: 0.15,
        }
    }
}

impl HealthScoreWeights {
    pub fn blend(&self, c: &HealthComponents) -> u8 {
        let weighted = self.labor_market * c.labor_market
            + self.inflation * c.inflation
            + self.economic_growth * c.economic_growth
            + self.fiscal_health * c.fiscal_health
            + self.market_conditions * c.market_conditions;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Deteriorating,
    Stable,
}

/// Risk level derived from the overall score (higher score, lower risk).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EconomicRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl EconomicRiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            EconomicRiskLevel::Low
        } else if score >= 60 {
            EconomicRiskLevel::Medium
        } else if score >= 40 {
            EconomicRiskLevel::High
        } else {
            EconomicRiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EconomicRiskLevel::Low => "low",
            EconomicRiskLevel::Medium => "medium",
            EconomicRiskLevel::High => "high",
            EconomicRiskLevel::Critical => "critical",
        }
    }
}

/// Composite 0-100 economic health score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicHealthScore {
    pub overall_score: u8,
    pub components: HealthComponents,
    pub narrative: String,
    pub trend: HealthTrend,
    pub risk_level: EconomicRiskLevel,
}
