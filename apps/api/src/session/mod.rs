//! The signed-in user, resolved per request from the identity provider.
//!
//! Handlers that need the user take `Session` as an extractor argument;
//! there is no ambient "current user".

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use serde::Serialize;
use thiserror::Error;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;
pub mod http;

pub use http::HttpIdentityProvider;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Session {
    /// Identity provider subject; also the `users.id` key.
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("session token rejected")]
    Rejected,

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed identity response: {0}")]
    Malformed(String),
}

/// Resolves a bearer session token to the user it belongs to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Session, IdentityError>;
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let session = state.identity.resolve(token).await?;
        tracing::debug!("Resolved session for user {}", session.user_id);
        Ok(session)
    }
}
