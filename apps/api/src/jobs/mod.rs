//! Job listings: plain insert, read back newest first.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::NewJob;
use crate::session::Session;
use crate::validation::{blank_to_none, require_http_url, require_non_empty};

pub mod handlers;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    pub application_url: String,
}

impl CreateJobRequest {
    /// Trims every field and stamps the poster from the session.
    pub fn into_new_job(self, session: &Session) -> Result<NewJob, AppError> {
        Ok(NewJob {
            title: require_non_empty("title", &self.title)?,
            company: require_non_empty("company", &self.company)?,
            location: require_non_empty("location", &self.location)?,
            description: require_non_empty("description", &self.description)?,
            requirements: require_non_empty("requirements", &self.requirements)?,
            salary_range: blank_to_none(self.salary_range.as_deref()),
            application_url: require_http_url("application_url", &self.application_url)?,
            posted_by: session.user_id.clone(),
        })
    }
}

pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
