use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CorrelationAnalysis, EconomicHealthScore, EconomicInsight};
use crate::services::{correlation_service, health_score_service, insight_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/insights/:indicator_name", get(get_insight))
        .route("/health-score", get(get_health_score))
        .route("/correlations", get(get_correlations))
}

/// GET /api/economy/insights/:indicator_name
///
/// Insight on the indicator's latest move. 404 when the indicator is unknown,
/// has fewer than two observations, or could not be read.
pub async fn get_insight(
    Path(indicator_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<EconomicInsight>, AppError> {
    info!("GET /api/economy/insights/{}", indicator_name);

    if indicator_name.trim().is_empty() {
        return Err(AppError::Validation("indicator name must not be empty".to_string()));
    }

    insight_service::generate_economic_insight(
        state.store.as_ref(),
        &state.analysis,
        &state.narrator,
        &indicator_name,
    )
    .await
    .map(Json)
    .ok_or(AppError::NotFound)
}

/// GET /api/economy/health-score
///
/// 503 when the indicator store cannot be read.
pub async fn get_health_score(
    State(state): State<AppState>,
) -> Result<Json<EconomicHealthScore>, AppError> {
    info!("GET /api/economy/health-score");

    health_score_service::calculate_economic_health_score(state.store.as_ref(), &state.narrator)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to calculate economic health score: {}", e);
            e
        })
}

/// GET /api/economy/correlations
pub async fn get_correlations(State(state): State<AppState>) -> Json<Vec<CorrelationAnalysis>> {
    info!("GET /api/economy/correlations");

    Json(
        correlation_service::analyze_correlations(
            state.store.as_ref(),
            &state.analysis,
            &state.narrator,
        )
        .await,
    )
}
