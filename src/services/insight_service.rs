use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::models::{EconomicInsight, IndicatorSeries, InsightTrend};
use crate::services::narrative_service::{HistoricalStats, InsightFacts, Narrator};
use crate::services::statistics::{determine_trend, mean_std_dev, percent_change, percentile_rank};
use crate::store::{SeriesStore, StoreError};

/// Build a narrative insight about an indicator's most recent move.
///
/// Returns `None` when the indicator does not exist, has fewer than two
/// observations, or the store fails. Never returns a partial insight.
pub async fn generate_economic_insight(
    store: &dyn SeriesStore,
    config: &AnalysisConfig,
    narrator: &Narrator,
    indicator_name: &str,
) -> Option<EconomicInsight> {
    match build_insight(store, config, narrator, indicator_name).await {
        Ok(insight) => insight,
        Err(e) => {
            warn!("Failed to generate insight for '{}': {}", indicator_name, e);
            None
        }
    }
}

async fn build_insight(
    store: &dyn SeriesStore,
    config: &AnalysisConfig,
    narrator: &Narrator,
    indicator_name: &str,
) -> Result<Option<EconomicInsight>, StoreError> {
    let Some(series) = store.get_indicator_by_name(indicator_name).await? else {
        info!("No indicator named '{}'", indicator_name);
        return Ok(None);
    };

    if series.data.len() < 2 {
        info!(
            "Indicator '{}' has {} data point(s); at least 2 are needed for an insight",
            indicator_name,
            series.data.len()
        );
        return Ok(None);
    }

    let current = series.data[0];
    let previous = series.data[1];

    let change_percent = percent_change(current.value, previous.value);
    let trend = InsightTrend::from_change(change_percent);
    let significance = config.significance.assess_significance(
        change_percent.abs(),
        &series.category,
        &series.source,
    );
    let trend_analysis = determine_trend(&series.data);

    debug!(
        "Insight for '{}': change={:.4}%, trend={:?}, significance={:?}",
        series.name, change_percent, trend, significance
    );

    let stats = historical_stats(&series, config.min_history_for_context);
    let historical_context = narrator.historical_context(&series.name, stats.as_ref());

    let related_indicators =
        resolve_related(store, &series, config.related_indicator_limit).await?;

    let facts = InsightFacts {
        indicator_name: &series.name,
        category: &series.category,
        as_of: current.date,
        current_value: current.value,
        previous_value: previous.value,
        change_percent,
        trend,
        significance,
        trend_analysis: &trend_analysis,
    };
    let (narrative, investment_implication) = narrator.insight(&facts);

    Ok(Some(EconomicInsight {
        indicator_name: series.name.clone(),
        category: series.category.clone(),
        source: series.source.clone(),
        as_of: current.date,
        current_value: current.value,
        previous_value: previous.value,
        change_percent,
        trend,
        significance,
        narrative,
        investment_implication,
        historical_context,
        related_indicators,
        trend_analysis,
    }))
}

/// Percentile and range over the full history, once enough points exist.
fn historical_stats(series: &IndicatorSeries, min_points: usize) -> Option<HistoricalStats> {
    if series.data.len() < min_points {
        return None;
    }
    let latest = series.data.first()?;
    let oldest = series.data.last()?;

    let values = series.values();
    let (mean, _) = mean_std_dev(&values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(HistoricalStats {
        observations: values.len(),
        latest: latest.value,
        min,
        max,
        mean,
        percentile: percentile_rank(latest.value, &values),
        first_date: oldest.date,
        last_date: latest.date,
    })
}

/// Up to `limit` related indicator names that the store can actually resolve.
async fn resolve_related(
    store: &dyn SeriesStore,
    series: &IndicatorSeries,
    limit: usize,
) -> Result<Vec<String>, StoreError> {
    let candidates: Vec<String> = series
        .related_candidates
        .iter()
        .filter(|name| **name != series.name)
        .take(limit)
        .cloned()
        .collect();

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let found = store.list_indicators_by_names(&candidates).await?;
    Ok(candidates
        .into_iter()
        .filter(|name| found.iter().any(|s| &s.name == name))
        .collect())
}
