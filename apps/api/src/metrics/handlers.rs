use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::AppError;
use crate::metrics::{
    compute_dashboard_stats, scoring_formula, system_health, DashboardStats, ScoringFormula,
    SystemHealth,
};
use crate::models::run::SearchRun;
use crate::routes::{AppQuery, UserIdQuery};
use crate::state::AppState;

/// GET /api/v1/metrics/overview
pub async fn handle_overview(
    State(state): State<AppState>,
    AppQuery(user): AppQuery<UserIdQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    let jobs = state.store.jobs_for_user(user.user_id).await?;
    Ok(Json(compute_dashboard_stats(&jobs)))
}

/// GET /api/v1/metrics/scoring
pub async fn handle_scoring_formula(State(state): State<AppState>) -> Json<ScoringFormula> {
    Json(scoring_formula(state.engine.weights()))
}

/// GET /api/v1/metrics/runs
pub async fn handle_runs(
    State(state): State<AppState>,
    AppQuery(user): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<SearchRun>>, AppError> {
    Ok(Json(state.store.runs_for_user(user.user_id).await?))
}

/// GET /api/v1/metrics/health
pub async fn handle_system_health(
    State(state): State<AppState>,
    AppQuery(user): AppQuery<UserIdQuery>,
) -> Result<Json<SystemHealth>, AppError> {
    let runs = state.store.runs_for_user(user.user_id).await?;
    Ok(Json(system_health(&runs, Utc::now())))
}
