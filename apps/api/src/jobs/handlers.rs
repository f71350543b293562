use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::jobs::{clamp_limit, CreateJobRequest};
use crate::models::job::JobRow;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let new_job = request.into_new_job(&session)?;
    let row = state.jobs.insert_job(&new_job).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs
///
/// Public; newest listings first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListJobsQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = state.jobs.list_jobs(clamp_limit(params.limit)).await?;
    Ok(Json(jobs))
}
