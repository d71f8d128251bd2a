pub mod health;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    routing::{get, post, put},
    Router,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::{jobs, metrics, runs, scoring};

/// Caller identity. Authentication happens upstream.
#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// `Query` whose rejection is reported through the `AppError` envelope.
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppQuery(value))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring engine
        .route("/api/v1/scoring/score", post(scoring::handlers::handle_score))
        .route("/api/v1/scoring/verify", post(scoring::handlers::handle_verify))
        .route(
            "/api/v1/scoring/tiers/:tier",
            get(scoring::handlers::handle_tier),
        )
        .route(
            "/api/v1/scoring/runs",
            post(runs::handlers::handle_scoring_run),
        )
        // Job feed
        .route("/api/v1/jobs", get(jobs::handlers::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_get_job))
        .route(
            "/api/v1/jobs/:id/status",
            put(jobs::handlers::handle_update_status),
        )
        // Metrics
        .route(
            "/api/v1/metrics/overview",
            get(metrics::handlers::handle_overview),
        )
        .route(
            "/api/v1/metrics/scoring",
            get(metrics::handlers::handle_scoring_formula),
        )
        .route("/api/v1/metrics/runs", get(metrics::handlers::handle_runs))
        .route(
            "/api/v1/metrics/health",
            get(metrics::handlers::handle_system_health),
        )
        .with_state(state)
}
