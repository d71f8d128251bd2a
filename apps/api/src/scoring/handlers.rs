use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::assessment::parse_assessor_value;
use crate::errors::AppError;
use crate::metrics::{tier_row, TierRow};
use crate::scoring::{ScoringBreakdown, Tier, Verification};
use crate::state::AppState;

/// POST /api/v1/scoring/score
/// Body: assessor output, either a JSON object or a JSON string of raw LLM text.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ScoringBreakdown>, AppError> {
    let assessment = parse_assessor_value(body)?;
    Ok(Json(state.engine.score(assessment)))
}

/// POST /api/v1/scoring/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(breakdown): Json<ScoringBreakdown>,
) -> Json<Verification> {
    Json(state.engine.verify(&breakdown))
}

/// GET /api/v1/scoring/tiers/:tier
pub async fn handle_tier(Path(tier): Path<String>) -> Result<Json<TierRow>, AppError> {
    let tier = tier
        .parse::<Tier>()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(Json(tier_row(tier)))
}
