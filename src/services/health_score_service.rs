use futures::future::try_join_all;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{
    EconomicHealthScore, EconomicRiskLevel, HealthComponents, HealthScoreWeights, HealthTrend,
    IndicatorSeries, NEUTRAL_SCORE,
};
use crate::services::narrative_service::{HealthFacts, Narrator};
use crate::services::statistics::percent_change;
use crate::store::SeriesStore;

pub const UNEMPLOYMENT_RATE: &str = "Unemployment Rate";
pub const CONSUMER_PRICE_INDEX: &str = "Consumer Price Index";
pub const REAL_GDP: &str = "Real GDP";
pub const FEDERAL_BUDGET_BALANCE: &str = "Federal Budget Balance";
pub const SP500: &str = "S&P 500";

/// Index of the one-year-prior observation in a monthly series.
const YEAR_AGO_INDEX: usize = 12;

const INFLATION_TARGET: f64 = 2.0;

/// Mean component deviation from neutral needed to call a direction.
const TREND_BAND: f64 = 5.0;

/// Compute the composite economic health score.
///
/// Missing indicators or indicators without enough data contribute a neutral
/// 50. A store failure is returned as an error rather than a default score.
pub async fn calculate_economic_health_score(
    store: &dyn SeriesStore,
    narrator: &Narrator,
) -> Result<EconomicHealthScore, AppError> {
    info!("Calculating economic health score");

    let names = [
        UNEMPLOYMENT_RATE,
        CONSUMER_PRICE_INDEX,
        REAL_GDP,
        FEDERAL_BUDGET_BALANCE,
        SP500,
    ];
    let fetched = try_join_all(names.iter().map(|name| store.get_indicator_by_name(name))).await?;

    let [unemployment, cpi, gdp, budget, sp500]: [Option<IndicatorSeries>; 5] = fetched
        .try_into()
        .map_err(|_| AppError::Validation("unexpected indicator count".to_string()))?;

    let components = HealthComponents {
        labor_market: labor_market_score(unemployment.as_ref()),
        inflation: inflation_score(cpi.as_ref()),
        economic_growth: growth_score(gdp.as_ref()),
        fiscal_health: fiscal_score(budget.as_ref()),
        market_conditions: market_score(sp500.as_ref()),
    };

    Ok(score_components(components, &HealthScoreWeights::default(), narrator))
}

/// Blend components into the final score, trend, risk level and narrative.
pub fn score_components(
    components: HealthComponents,
    weights: &HealthScoreWeights,
    narrator: &Narrator,
) -> EconomicHealthScore {
    let overall_score = weights.blend(&components);
    let risk_level = EconomicRiskLevel::from_score(overall_score);
    let trend = classify_trend(&components);

    debug!(
        "Health components: {:?} -> overall {} ({:?}, {:?})",
        components, overall_score, risk_level, trend
    );

    let narrative = narrator.health(&HealthFacts {
        overall_score,
        components,
        trend,
        risk_level,
    });

    EconomicHealthScore {
        overall_score,
        components,
        narrative,
        trend,
        risk_level,
    }
}

/// Improving/deteriorating when the components on average sit more than
/// `TREND_BAND` points away from neutral; stable otherwise.
pub fn classify_trend(components: &HealthComponents) -> HealthTrend {
    let labelled = components.labelled();
    let mean_deviation = labelled.iter().map(|(_, score)| score - NEUTRAL_SCORE).sum::<f64>()
        / labelled.len() as f64;

    if mean_deviation > TREND_BAND {
        HealthTrend::Improving
    } else if mean_deviation < -TREND_BAND {
        HealthTrend::Deteriorating
    } else {
        HealthTrend::Stable
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return NEUTRAL_SCORE;
    }
    score.clamp(0.0, 100.0)
}

fn latest_value(series: Option<&IndicatorSeries>) -> Option<f64> {
    series.and_then(|s| s.latest()).map(|p| p.value)
}

/// Percent change between the latest value and the value `lookback`
/// observations earlier (or the oldest one available). `None` without at
/// least two observations or with a zero base.
fn change_over(series: Option<&IndicatorSeries>, lookback: usize) -> Option<f64> {
    let data = &series?.data;
    if data.len() < 2 {
        return None;
    }
    let base = data[lookback.min(data.len() - 1)].value;
    if base == 0.0 {
        return None;
    }
    Some(percent_change(data[0].value, base))
}

/// 3% unemployment scores 100, 10% scores 0.
pub fn labor_market_score(unemployment: Option<&IndicatorSeries>) -> f64 {
    match latest_value(unemployment) {
        Some(rate) => clamp_score(100.0 - (rate - 3.0) * 100.0 / 7.0),
        None => NEUTRAL_SCORE,
    }
}

/// Distance of year-over-year CPI inflation from the 2% target.
pub fn inflation_score(cpi: Option<&IndicatorSeries>) -> f64 {
    match change_over(cpi, YEAR_AGO_INDEX) {
        Some(yoy) => clamp_score(100.0 - (yoy - INFLATION_TARGET).abs() * 10.0),
        None => NEUTRAL_SCORE,
    }
}

/// Growth between the two most recent GDP samples.
pub fn growth_score(gdp: Option<&IndicatorSeries>) -> f64 {
    match change_over(gdp, 1) {
        Some(growth) => clamp_score(50.0 + growth * 12.5),
        None => NEUTRAL_SCORE,
    }
}

/// Change in the budget balance relative to the magnitude of the prior
/// reading; a shrinking deficit or growing surplus scores above 50.
pub fn fiscal_score(balance: Option<&IndicatorSeries>) -> f64 {
    let Some(data) = balance.map(|s| &s.data) else {
        return NEUTRAL_SCORE;
    };
    if data.len() < 2 || data[1].value == 0.0 {
        return NEUTRAL_SCORE;
    }
    let improvement = (data[0].value - data[1].value) / data[1].value.abs() * 100.0;
    clamp_score(50.0 + improvement * 2.5)
}

/// S&P 500 return over roughly the last year (+20% scores 100).
pub fn market_score(index: Option<&IndicatorSeries>) -> f64 {
    match change_over(index, YEAR_AGO_INDEX) {
        Some(ret) => clamp_score(50.0 + ret * 2.5),
        None => NEUTRAL_SCORE,
    }
}
