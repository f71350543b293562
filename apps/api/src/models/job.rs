use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: Option<String>,
    pub application_url: String,
    /// User id of the poster.
    pub posted_by: String,
    pub created_at: DateTime<Utc>,
}

/// A validated job listing ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: Option<String>,
    pub application_url: String,
    pub posted_by: String,
}
