use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `resumes` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ResumeRow {
    pub id: i64,
    pub user_id: String,
    pub public_url: String,
    /// Object key inside the resumes bucket.
    pub file_path: String,
    /// 0 – 100. Written as 0 on upload; nothing computes it.
    pub ats_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: String,
    pub public_url: String,
    pub file_path: String,
    pub ats_score: i32,
}
