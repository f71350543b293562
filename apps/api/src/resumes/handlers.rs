//! Axum route handlers for the Resume API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::resume::ResumeRow;
use crate::resumes::upload::{upload_resume, ResumeFile};
use crate::resumes::{orphaned_paths, AtsScore};
use crate::session::Session;
use crate::state::AppState;

/// Name of the multipart part carrying the PDF.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AtsScoreUpdate {
    pub ats_score: i32,
}

#[derive(Debug, Serialize)]
pub struct OrphansResponse {
    pub paths: Vec<String>,
}

/// POST /api/v1/resumes
///
/// Multipart upload; the PDF goes in the `file` part.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let file = read_file_part(&mut multipart).await?;
    let row = upload_resume(
        state.resumes.as_ref(),
        state.objects.as_ref(),
        &state.upload_retry,
        &session.user_id,
        file,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(state.resumes.list_resumes(&session.user_id).await?))
}

/// GET /api/v1/resumes/latest/ats-score
pub async fn handle_latest_ats_score(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<AtsScore>, AppError> {
    let latest = state
        .resumes
        .latest_resume(&session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume uploaded yet".to_string()))?;
    Ok(Json(AtsScore::from(&latest)))
}

/// PATCH /api/v1/resumes/:id/ats-score
pub async fn handle_update_ats_score(
    State(state): State<AppState>,
    session: Session,
    ApiPath(resume_id): ApiPath<i64>,
    ApiJson(update): ApiJson<AtsScoreUpdate>,
) -> Result<Json<ResumeRow>, AppError> {
    if !(0..=100).contains(&update.ats_score) {
        return Err(AppError::Validation(
            "ats_score must be between 0 and 100".to_string(),
        ));
    }
    let row = state
        .resumes
        .update_ats_score(&session.user_id, resume_id, update.ats_score)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/resumes/orphans
///
/// Objects under the user's prefix with no row pointing at them, left
/// behind when a compensating removal failed. Read-only.
pub async fn handle_list_orphans(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<OrphansResponse>, AppError> {
    let stored = state
        .objects
        .list(&format!("{}/", session.user_id))
        .await?;
    let resumes = state.resumes.list_resumes(&session.user_id).await?;
    Ok(Json(OrphansResponse {
        paths: orphaned_paths(stored, &resumes),
    }))
}

async fn read_file_part(multipart: &mut Multipart) -> Result<ResumeFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(ResumeFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
