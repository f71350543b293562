//! Profile upsert keyed on the session user id.
//!
//! `name` and `email` always come from the identity provider. Link fields
//! follow patch semantics: absent keeps the stored value, an empty string
//! clears it, anything else must be an http(s) URL.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::session::Session;
use crate::store::UserStore;
use crate::validation::require_http_url;

pub mod handlers;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

/// Resolved change for one link column.
#[derive(Debug, PartialEq)]
enum LinkChange {
    Keep,
    Clear,
    Set(String),
}

fn link_change(field: &str, value: Option<&str>) -> Result<LinkChange, AppError> {
    match value {
        None => Ok(LinkChange::Keep),
        Some(v) if v.trim().is_empty() => Ok(LinkChange::Clear),
        Some(v) => require_http_url(field, v).map(LinkChange::Set),
    }
}

fn apply(change: LinkChange, current: Option<String>) -> Option<String> {
    match change {
        LinkChange::Keep => current,
        LinkChange::Clear => None,
        LinkChange::Set(url) => Some(url),
    }
}

/// Produces the row to write: a fresh row for an unseen user, otherwise the
/// existing row with the patch applied and `created_at` untouched.
pub fn merge_profile(
    existing: Option<UserRow>,
    session: &Session,
    patch: &ProfilePatch,
    now: DateTime<Utc>,
) -> Result<UserRow, AppError> {
    let linkedin = link_change("linkedin_url", patch.linkedin_url.as_deref())?;
    let github = link_change("github_url", patch.github_url.as_deref())?;

    let (created_at, linkedin_url, github_url) = match existing {
        Some(row) => (row.created_at, row.linkedin_url, row.github_url),
        None => (now, None, None),
    };

    Ok(UserRow {
        id: session.user_id.clone(),
        name: session.name.clone(),
        email: session.email.clone(),
        linkedin_url: apply(linkedin, linkedin_url),
        github_url: apply(github, github_url),
        created_at,
        updated_at: now,
    })
}

/// Reads the current row, merges the patch, writes it back. No version
/// check: concurrent saves resolve last-write-wins.
pub async fn save_profile(
    users: &dyn UserStore,
    session: &Session,
    patch: &ProfilePatch,
) -> Result<UserRow, AppError> {
    let existing = users.get_user(&session.user_id).await?;
    let merged = merge_profile(existing, session, patch, Utc::now())?;
    Ok(users.upsert_user(&merged).await?)
}
