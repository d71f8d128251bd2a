use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::routes::{AppQuery, UserIdQuery};
use crate::runs::{execute_run, ScoringRunRequest, ScoringRunResponse};
use crate::state::AppState;

/// POST /api/v1/scoring/runs
pub async fn handle_scoring_run(
    State(state): State<AppState>,
    AppQuery(user): AppQuery<UserIdQuery>,
    Json(req): Json<ScoringRunRequest>,
) -> Result<Json<ScoringRunResponse>, AppError> {
    if let Some(profile) = &req.profile {
        if profile.user_id != user.user_id {
            return Err(AppError::Validation(format!(
                "Profile {} does not belong to this user",
                profile.id
            )));
        }
    }
    let response = execute_run(state.store.as_ref(), &state.engine, user.user_id, req).await?;
    Ok(Json(response))
}
