use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::job::{JobRow, NewJob};
use crate::models::resume::{NewResume, ResumeRow};
use crate::models::user::UserRow;
use crate::store::{JobStore, ResumeStore, StoreResult, UserStore};

/// Pass-through queries against the hosted Postgres. No transactions: every
/// method is a single statement.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRow>> {
        Ok(
            sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert_user(&self, user: &UserRow) -> StoreResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, linkedin_url, github_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.linkedin_url)
        .bind(&user.github_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Upserted profile for user {}", row.id);
        Ok(row)
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert_resume(&self, resume: &NewResume) -> StoreResult<ResumeRow> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (user_id, public_url, file_path, ats_score)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&resume.user_id)
        .bind(&resume.public_url)
        .bind(&resume.file_path)
        .bind(resume.ats_score)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn list_resumes(&self, user_id: &str) -> StoreResult<Vec<ResumeRow>> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn latest_resume(&self, user_id: &str) -> StoreResult<Option<ResumeRow>> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_ats_score(
        &self,
        user_id: &str,
        resume_id: i64,
        ats_score: i32,
    ) -> StoreResult<Option<ResumeRow>> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET ats_score = $1, updated_at = now()
            WHERE id = $2 AND user_id = $3
            RETURNING *
            "#,
        )
        .bind(ats_score)
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn insert_job(&self, job: &NewJob) -> StoreResult<JobRow> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs
                (title, company, location, description, requirements,
                 salary_range, application_url, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.salary_range)
        .bind(&job.application_url)
        .bind(&job.posted_by)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted job {} posted by {}", row.id, row.posted_by);
        Ok(row)
    }

    async fn list_jobs(&self, limit: i64) -> StoreResult<Vec<JobRow>> {
        Ok(sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}
