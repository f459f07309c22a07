//! End-to-end tests for the economic analysis engine and its JSON routes,
//! run against the in-memory indicator store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{Months, NaiveDate};
use serde_json::Value;
use tower::ServiceExt;

use econ_pulse::app::create_app;
use econ_pulse::config::AnalysisConfig;
use econ_pulse::models::{DataPoint, IndicatorSeries};
use econ_pulse::services::correlation_service::analyze_correlations;
use econ_pulse::services::health_score_service::calculate_economic_health_score;
use econ_pulse::services::insight_service::generate_economic_insight;
use econ_pulse::services::narrative_service::Narrator;
use econ_pulse::state::AppState;
use econ_pulse::store::InMemorySeriesStore;

/// Monthly series starting January 2022, given in chronological order.
fn monthly(name: &str, category: &str, values: &[f64]) -> IndicatorSeries {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let data = values
        .iter()
        .enumerate()
        .map(|(i, &v)| DataPoint::new(start + Months::new(i as u32), v))
        .collect();
    IndicatorSeries::new(name, category, "FRED").with_data(data)
}

fn economy() -> InMemorySeriesStore {
    let n = 30;
    let unemployment: Vec<f64> = (0..n).map(|i| 4.2 - 0.02 * i as f64 + 0.05 * (i as f64).cos()).collect();
    let cpi: Vec<f64> = (0..n).map(|i| 290.0 * 1.0025_f64.powi(i)).collect();
    let gdp: Vec<f64> = (0..n).map(|i| 21000.0 + 55.0 * i as f64 + 30.0 * (i as f64 * 0.9).sin()).collect();
    let sp500: Vec<f64> = (0..n).map(|i| 4100.0 + 25.0 * i as f64 + 90.0 * (i as f64 * 0.5).sin()).collect();
    let budget: Vec<f64> = (0..n).map(|i| -150.0 + 1.5 * i as f64).collect();

    InMemorySeriesStore::with_series(vec![
        monthly("Unemployment Rate", "employment", &unemployment),
        monthly("Nonfarm Payrolls", "employment", &[150.0, 155.0, 149.0]),
        monthly("Consumer Price Index", "inflation", &cpi),
        monthly("Real GDP", "gdp", &gdp),
        monthly("S&P 500", "market_indices", &sp500),
        monthly("Federal Budget Balance", "fiscal", &budget),
        monthly("Single Reading", "employment", &[1.0]),
    ])
}

async fn get_json(store: InMemorySeriesStore, uri: &str) -> (StatusCode, Value) {
    let app = create_app(AppState::new(Arc::new(store), AnalysisConfig::default()));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_insight_end_to_end() {
    let store = economy();
    let insight = generate_economic_insight(&store, &AnalysisConfig::default(), &Narrator::default(), "Consumer Price Index")
        .await
        .unwrap();

    assert!((insight.change_percent - 0.25).abs() < 1e-6);
    assert!(insight.historical_context.contains("30 observations"));
    assert!(insight.narrative.starts_with("Consumer Price Index"));
}

#[tokio::test]
async fn test_insight_missing_cases() {
    let store = economy();
    let config = AnalysisConfig::default();
    let narrator = Narrator::default();

    assert!(generate_economic_insight(&store, &config, &narrator, "Single Reading").await.is_none());
    assert!(generate_economic_insight(&store, &config, &narrator, "'; DROP TABLE indicators; --").await.is_none());
}

#[tokio::test]
async fn test_health_score_weighted_sum_holds() {
    let score = calculate_economic_health_score(&economy(), &Narrator::default()).await.unwrap();
    let c = score.components;
    let expected = (0.25 * c.labor_market
        + 0.20 * c.inflation
        + 0.25 * c.economic_growth
        + 0.15 * c.fiscal_health
        + 0.15 * c.market_conditions)
        .round() as u8;

    assert_eq!(score.overall_score, expected);
    for value in [c.labor_market, c.inflation, c.economic_growth, c.fiscal_health, c.market_conditions] {
        assert!((0.0..=100.0).contains(&value));
    }
    assert!(score.narrative.contains(&format!("{}/100", score.overall_score)));
}

#[tokio::test]
async fn test_correlations_sorted_and_bounded() {
    let results = analyze_correlations(&economy(), &AnalysisConfig::default(), &Narrator::default()).await;
    assert!(!results.is_empty());
    for r in &results {
        assert!((-1.0..=1.0).contains(&r.correlation_coeff));
        assert!(r.confidence > 0.0 && r.confidence <= 100.0);
    }
    for pair in results.windows(2) {
        assert!(pair[0].correlation_coeff.abs() >= pair[1].correlation_coeff.abs());
    }
}

#[tokio::test]
async fn test_routes_use_contract_field_names() {
    let (status, insight) = get_json(economy(), "/api/economy/insights/Real%20GDP").await;
    assert_eq!(status, StatusCode::OK);
    assert!(insight.get("changePercent").is_some());
    assert!(insight.get("investmentImplication").is_some());
    assert!(insight.get("relatedIndicators").is_some());

    let (status, score) = get_json(economy(), "/api/economy/health-score").await;
    assert_eq!(status, StatusCode::OK);
    assert!(score.get("overallScore").is_some());
    assert!(score["components"].get("laborMarket").is_some());
    assert!(score["components"].get("marketConditions").is_some());
    assert!(score.get("riskLevel").is_some());

    let (status, correlations) = get_json(economy(), "/api/economy/correlations").await;
    assert_eq!(status, StatusCode::OK);
    let first = &correlations.as_array().unwrap()[0];
    assert!(first.get("correlationCoeff").is_some());
    assert!(first.get("indicatorAId").is_some());
    assert!(first.get("lagDays").is_some());
}

#[tokio::test]
async fn test_unknown_indicator_route_is_404() {
    let (status, _) = get_json(economy(), "/api/economy/insights/Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_store_health_route_is_neutral() {
    let (status, score) = get_json(InMemorySeriesStore::new(), "/api/economy/health-score").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["overallScore"], 50);
    assert_eq!(score["trend"], "stable");
    assert_eq!(score["riskLevel"], "high");
}
