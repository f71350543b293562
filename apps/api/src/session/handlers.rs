use axum::{extract::State, Json};
use serde::Serialize;

use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthConfigResponse {
    pub sign_in_url: String,
    pub sign_out_redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Session,
    pub sign_out_redirect_url: String,
}

/// GET /api/v1/auth/config
///
/// Where the client sends users to sign in, and where they land after signing out.
pub async fn handle_auth_config(State(state): State<AppState>) -> Json<AuthConfigResponse> {
    Json(AuthConfigResponse {
        sign_in_url: state.config.identity_sign_in_url.clone(),
        sign_out_redirect_url: state.config.sign_out_redirect_url.clone(),
    })
}

/// GET /api/v1/session
pub async fn handle_get_session(
    State(state): State<AppState>,
    session: Session,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: session,
        sign_out_redirect_url: state.config.sign_out_redirect_url.clone(),
    })
}
