//! Table-scoped access to the hosted relational store.
//!
//! Each table gets a narrow trait so handlers can be exercised against an
//! in-memory double. `PgStore` is the production implementation of all three.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::{JobRow, NewJob};
use crate::models::resume::{NewResume, ResumeRow};
use crate::models::user::UserRow;

pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Sqlx(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRow>>;

    /// Inserts the row, or overwrites every column except `created_at` when
    /// the id already exists. Last write wins.
    async fn upsert_user(&self, user: &UserRow) -> StoreResult<UserRow>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert_resume(&self, resume: &NewResume) -> StoreResult<ResumeRow>;

    /// All resumes owned by `user_id`, newest first.
    async fn list_resumes(&self, user_id: &str) -> StoreResult<Vec<ResumeRow>>;

    async fn latest_resume(&self, user_id: &str) -> StoreResult<Option<ResumeRow>>;

    /// Returns `None` when no resume with this id belongs to `user_id`.
    async fn update_ats_score(
        &self,
        user_id: &str,
        resume_id: i64,
        ats_score: i32,
    ) -> StoreResult<Option<ResumeRow>>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, job: &NewJob) -> StoreResult<JobRow>;

    /// Most recent listings first, ties broken by descending id.
    async fn list_jobs(&self, limit: i64) -> StoreResult<Vec<JobRow>>;
}
