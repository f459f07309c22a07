use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::models::{
    CorrelationAnalysis, CorrelationDirection, CorrelationStrength, IndicatorSeries,
};
use crate::services::alignment::align_series;
use crate::services::narrative_service::{CorrelationFacts, Narrator};
use crate::services::statistics::pearson_correlation;
use crate::store::{SeriesStore, StoreError};

/// Indicator pairs with an economic reason to move together (or apart).
pub const CORRELATION_CATALOGUE: &[(&str, &str)] = &[
    ("Unemployment Rate", "Consumer Price Index"),
    ("Unemployment Rate", "Real GDP"),
    ("Unemployment Rate", "S&P 500"),
    ("Federal Funds Rate", "Consumer Price Index"),
    ("Federal Funds Rate", "S&P 500"),
    ("Federal Funds Rate", "10-Year Treasury Yield"),
    ("10-Year Treasury Yield", "Consumer Price Index"),
    ("Real GDP", "S&P 500"),
    ("Consumer Price Index", "S&P 500"),
    ("Federal Budget Balance", "Real GDP"),
];

/// Correlate every catalogue pair with enough aligned history, strongest first.
///
/// Advisory: a store failure is logged and yields an empty list.
pub async fn analyze_correlations(
    store: &dyn SeriesStore,
    config: &AnalysisConfig,
    narrator: &Narrator,
) -> Vec<CorrelationAnalysis> {
    match analyze_pairs(store, config, narrator, CORRELATION_CATALOGUE).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Correlation analysis failed, returning no results: {}", e);
            Vec::new()
        }
    }
}

/// Correlate an explicit list of indicator-name pairs.
pub async fn analyze_pairs(
    store: &dyn SeriesStore,
    config: &AnalysisConfig,
    narrator: &Narrator,
    pairs: &[(&str, &str)],
) -> Result<Vec<CorrelationAnalysis>, StoreError> {
    let names: Vec<String> = pairs
        .iter()
        .flat_map(|(a, b)| [*a, *b])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect();

    let series: HashMap<String, IndicatorSeries> = store
        .list_indicators_by_names(&names)
        .await?
        .into_iter()
        .map(|s| (s.name.clone(), s))
        .collect();

    let mut results: Vec<CorrelationAnalysis> = pairs
        .iter()
        .filter_map(|(a, b)| match (series.get(*a), series.get(*b)) {
            (Some(a), Some(b)) => correlate_pair(a, b, config, narrator),
            _ => {
                debug!("Skipping pair {} / {}: indicator not found", a, b);
                None
            }
        })
        .collect();

    sort_by_magnitude(&mut results);

    info!(
        "Correlation analysis complete: {} of {} pairs reported",
        results.len(),
        pairs.len()
    );
    Ok(results)
}

/// Correlate two series over their most recent common dates.
///
/// `None` when fewer than `min_aligned_points` dates match or the
/// coefficient is not finite.
pub fn correlate_pair(
    a: &IndicatorSeries,
    b: &IndicatorSeries,
    config: &AnalysisConfig,
    narrator: &Narrator,
) -> Option<CorrelationAnalysis> {
    let mut aligned = align_series(&a.data, &b.data);
    aligned.truncate(config.correlation_window);

    if aligned.len() < config.min_aligned_points {
        debug!(
            "Skipping pair {} / {}: {} aligned points, need {}",
            a.name,
            b.name,
            aligned.len(),
            config.min_aligned_points
        );
        return None;
    }

    let r = pearson_correlation(&aligned.a, &aligned.b);
    if !r.is_finite() {
        warn!("Skipping pair {} / {}: non-finite correlation", a.name, b.name);
        return None;
    }
    let r = r.clamp(-1.0, 1.0);

    let strength = CorrelationStrength::from_coefficient(r);
    let direction = CorrelationDirection::from_coefficient(r);
    let sample_size = aligned.len();

    let narrative = narrator.correlation(&CorrelationFacts {
        indicator_a: &a.name,
        indicator_b: &b.name,
        coefficient: r,
        strength,
        direction,
        sample_size,
    });

    Some(CorrelationAnalysis {
        indicator_a_id: a.id,
        indicator_b_id: b.id,
        indicator_a_name: a.name.clone(),
        indicator_b_name: b.name.clone(),
        correlation_coeff: r,
        strength,
        direction,
        lag_days: 0,
        confidence: correlation_confidence(sample_size, r),
        sample_size,
        narrative,
    })
}

/// Confidence in (0, 100]: a saturating function of the sample size,
/// `n / (n + 10)`, scaled by `0.3 + 0.7 * |r|`. Rounded to one decimal.
pub fn correlation_confidence(sample_size: usize, r: f64) -> f64 {
    let n = sample_size as f64;
    let sample_factor = n / (n + 10.0);
    let magnitude_factor = 0.3 + 0.7 * r.abs().min(1.0);
    let confidence = (100.0 * sample_factor * magnitude_factor * 10.0).round() / 10.0;
    confidence.clamp(1.0, 100.0)
}

fn sort_by_magnitude(results: &mut [CorrelationAnalysis]) {
    results.sort_by(|x, y| {
        y.correlation_coeff
            .abs()
            .partial_cmp(&x.correlation_coeff.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataPoint;
    use crate::store::InMemorySeriesStore;
    use async_trait::async_trait;
    use chrono::{Months, NaiveDate};

    fn monthly_from(name: &str, start: NaiveDate, values: &[f64]) -> IndicatorSeries {
        let data = values
            .iter()
            .enumerate()
            .map(|(i, &v)| DataPoint::new(start + Months::new(i as u32), v))
            .collect();
        IndicatorSeries::new(name, "test", "FRED").with_data(data)
    }

    fn jan_2022() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
    }

    fn wave(n: usize, scale: f64, offset: f64) -> Vec<f64> {
        (0..n).map(|i| offset + scale * (i as f64 + (i as f64 * 0.7).sin())).collect()
    }

    struct OfflineStore;

    #[async_trait]
    impl SeriesStore for OfflineStore {
        async fn get_indicator_by_name(&self, _: &str) -> Result<Option<IndicatorSeries>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn list_indicators_by_names(&self, _: &[String]) -> Result<Vec<IndicatorSeries>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    fn populated_store() -> InMemorySeriesStore {
        let noise: Vec<f64> = (0..30).map(|i| ((i * 7919) % 13) as f64).collect();
        InMemorySeriesStore::with_series(vec![
            monthly_from("Unemployment Rate", jan_2022(), &wave(30, -0.1, 6.0)),
            monthly_from("Consumer Price Index", jan_2022(), &wave(30, 1.5, 280.0)),
            monthly_from("Real GDP", jan_2022(), &noise),
            monthly_from("S&P 500", jan_2022(), &wave(30, 40.0, 3800.0)),
            // Mid-month dates never align with the first-of-month series
            monthly_from(
                "Federal Funds Rate",
                NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
                &wave(30, 0.2, 1.0),
            ),
        ])
    }

    #[tokio::test]
    async fn test_results_respect_bounds_and_ordering() {
        let results = analyze_correlations(&populated_store(), &AnalysisConfig::default(), &Narrator::default()).await;
        assert!(!results.is_empty());

        for result in &results {
            assert!(result.correlation_coeff >= -1.0 && result.correlation_coeff <= 1.0);
            assert!(result.confidence > 0.0 && result.confidence <= 100.0);
            assert!(result.narrative.to_lowercase().contains("correlation"));
            assert_eq!(result.sample_size, 24);
            assert_eq!(result.lag_days, 0);
        }
        for pair in results.windows(2) {
            assert!(pair[0].correlation_coeff.abs() >= pair[1].correlation_coeff.abs());
        }
    }

    #[tokio::test]
    async fn test_strongly_linked_pair_is_classified() {
        let results = analyze_correlations(&populated_store(), &AnalysisConfig::default(), &Narrator::default()).await;
        let pair = results
            .iter()
            .find(|r| r.indicator_a_name == "Unemployment Rate" && r.indicator_b_name == "Consumer Price Index")
            .unwrap();

        assert!((pair.correlation_coeff + 1.0).abs() < 1e-9);
        assert_eq!(pair.strength, CorrelationStrength::VeryStrong);
        assert_eq!(pair.direction, CorrelationDirection::Negative);
    }

    #[tokio::test]
    async fn test_pairs_without_common_dates_are_skipped() {
        let results = analyze_correlations(&populated_store(), &AnalysisConfig::default(), &Narrator::default()).await;
        assert!(results
            .iter()
            .all(|r| r.indicator_a_name != "Federal Funds Rate" && r.indicator_b_name != "Federal Funds Rate"));
    }

    #[tokio::test]
    async fn test_short_overlap_is_skipped() {
        let store = InMemorySeriesStore::with_series(vec![
            monthly_from("A", jan_2022(), &wave(10, 1.0, 0.0)),
            monthly_from("B", jan_2022(), &wave(10, 2.0, 5.0)),
        ]);
        let results = analyze_pairs(&store, &AnalysisConfig::default(), &Narrator::default(), &[("A", "B")])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_yields_empty_list() {
        let results = analyze_correlations(&OfflineStore, &AnalysisConfig::default(), &Narrator::default()).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_constant_series_reports_zero_weak() {
        let a = monthly_from("A", jan_2022(), &wave(24, 1.0, 0.0));
        let b = monthly_from("B", jan_2022(), &[7.0; 24]);
        let result = correlate_pair(&a, &b, &AnalysisConfig::default(), &Narrator::default()).unwrap();

        assert_eq!(result.correlation_coeff, 0.0);
        assert_eq!(result.strength, CorrelationStrength::Weak);
        assert_eq!(result.direction, CorrelationDirection::Positive);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_digit_leading_pair_narrative_is_capitalized() {
        let a = monthly_from("10-Year Treasury Yield", jan_2022(), &wave(24, 0.05, 3.0));
        let b = monthly_from("Consumer Price Index", jan_2022(), &wave(24, 1.5, 280.0));
        let result = correlate_pair(&a, &b, &AnalysisConfig::default(), &Narrator::default()).unwrap();

        assert!(result.narrative.chars().next().unwrap().is_uppercase());
        assert!(result.narrative.contains("10-Year Treasury Yield and Consumer Price Index"));
    }

    #[test]
    fn test_strength_breakpoints() {
        assert_eq!(CorrelationStrength::from_coefficient(0.8), CorrelationStrength::VeryStrong);
        assert_eq!(CorrelationStrength::from_coefficient(-0.79), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.6), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.3), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.29), CorrelationStrength::Weak);
    }

    #[test]
    fn test_confidence_is_monotonic_and_bounded() {
        assert!(correlation_confidence(40, 0.5) > correlation_confidence(20, 0.5));
        assert!(correlation_confidence(20, -0.9) > correlation_confidence(20, 0.4));
        assert!(correlation_confidence(1_000_000, 1.0) <= 100.0);
        assert!(correlation_confidence(20, 0.0) > 0.0);
    }
}
