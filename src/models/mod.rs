mod correlation;
mod health_score;
mod indicator;
mod insight;
mod trend;

pub use correlation::{CorrelationAnalysis, CorrelationDirection, CorrelationStrength};
pub use health_score::{
    EconomicHealthScore, EconomicRiskLevel, HealthComponents, HealthScoreWeights, HealthTrend,
    NEUTRAL_SCORE,
};
pub use indicator::{DataPoint, IndicatorSeries};
pub use insight::{EconomicInsight, InsightTrend, Significance};
pub use trend::{TrendDirection, TrendResult};
