use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::query::{JobPage, JobsQuery};
use crate::models::job::{Job, JobStatus};
use crate::routes::{AppQuery, UserIdQuery};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: JobStatus,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AppQuery(user): AppQuery<UserIdQuery>,
    AppQuery(query): AppQuery<JobsQuery>,
) -> Result<Json<JobPage>, AppError> {
    query.validate()?;
    let jobs = state.store.jobs_for_user(user.user_id).await?;
    Ok(Json(query.apply(jobs)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppQuery(user): AppQuery<UserIdQuery>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .store
        .get_job(user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppQuery(user): AppQuery<UserIdQuery>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .store
        .update_status(user.user_id, id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    tracing::debug!(job_id = %id, status = ?job.status, "Job status updated");
    Ok(Json(job))
}
