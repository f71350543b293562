//! Everything the dashboard page shows, in one response.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::models::user::UserRow;
use crate::resumes::AtsScore;
use crate::session::Session;
use crate::state::AppState;

pub const RECENT_JOBS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub profile: Option<UserRow>,
    pub recent_jobs: Vec<JobRow>,
    pub resumes: Vec<ResumeRow>,
    /// Score of the newest resume, if any.
    pub ats_score: Option<AtsScore>,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>, AppError> {
    let profile = state.users.get_user(&session.user_id).await?;
    let recent_jobs = state.jobs.list_jobs(RECENT_JOBS).await?;
    let resumes = state.resumes.list_resumes(&session.user_id).await?;
    let ats_score = resumes.first().map(AtsScore::from);

    Ok(Json(DashboardResponse {
        profile,
        recent_jobs,
        resumes,
        ats_score,
    }))
}
