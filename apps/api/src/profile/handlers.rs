use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::UserRow;
use crate::profile::{save_profile, ProfilePatch};
use crate::session::Session;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<UserRow>, AppError> {
    let user = state
        .users
        .get_user(&session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile has not been saved yet".to_string()))?;
    Ok(Json(user))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    session: Session,
    ApiJson(patch): ApiJson<ProfilePatch>,
) -> Result<Json<UserRow>, AppError> {
    let user = save_profile(state.users.as_ref(), &session, &patch).await?;
    Ok(Json(user))
}
