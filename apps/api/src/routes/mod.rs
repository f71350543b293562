pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};

use crate::dashboard;
use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::resumes::handlers as resumes;
use crate::resumes::upload::MAX_RESUME_BYTES;
use crate::session::handlers as session;
use crate::state::AppState;

/// Headroom over the file limit for multipart framing, so oversized files
/// reach the upload validator instead of failing inside the extractor.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/auth/config", get(session::handle_auth_config))
        .route("/api/v1/session", get(session::handle_get_session))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes)
                .post(resumes::handle_upload_resume)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/resumes/latest/ats-score",
            get(resumes::handle_latest_ats_score),
        )
        .route(
            "/api/v1/resumes/orphans",
            get(resumes::handle_list_orphans),
        )
        .route(
            "/api/v1/resumes/:id/ats-score",
            patch(resumes::handle_update_ats_score),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .with_state(state)
}
