//! Resume upload sequence.
//!
//! 1. Validate type and size locally.
//! 2. Upload to storage under `<user_id>/<unix_millis>.pdf`, retrying only
//!    on security/permission-flavored storage errors.
//! 3. Insert the `resumes` row with an ATS score of 0.
//! 4. If the insert fails, remove the uploaded object (best effort, once)
//!    and return the database error.
//!
//! There is no idempotency key: resubmitting after a failure can leave a
//! duplicate row or an orphaned object.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow};
use crate::retry::RetryPolicy;
use crate::storage::{ObjectStore, StorageError};
use crate::store::ResumeStore;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
pub const INITIAL_ATS_SCORE: i32 = 0;

/// A file received from the client, before validation.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

pub fn validate_resume_file(file: &ResumeFile) -> Result<(), AppError> {
    let content_type = file
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .unwrap_or_default();
    if !content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
        return Err(AppError::Validation(format!(
            "Resume must be a PDF (got '{}')",
            if content_type.is_empty() { "unknown" } else { content_type }
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::Validation("Resume file is empty".to_string()));
    }
    if file.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume is {} bytes; the limit is {} bytes (10 MB)",
            file.bytes.len(),
            MAX_RESUME_BYTES
        )));
    }
    Ok(())
}

pub fn storage_path(user_id: &str, at: DateTime<Utc>) -> String {
    format!("{}/{}.pdf", user_id, at.timestamp_millis())
}

/// Storage rejections worth retrying: the backend reports a security or
/// permission problem, which on the hosted platform is often a policy that
/// has not propagated yet.
pub fn is_transient_security_error(err: &StorageError) -> bool {
    let message = err.message().to_ascii_lowercase();
    message.contains("security") || message.contains("permission")
}

pub async fn upload_resume(
    resumes: &dyn ResumeStore,
    objects: &dyn ObjectStore,
    policy: &RetryPolicy,
    user_id: &str,
    file: ResumeFile,
) -> Result<ResumeRow, AppError> {
    validate_resume_file(&file)?;

    let path = storage_path(user_id, Utc::now());
    let body = file.bytes;
    let key = path.as_str();

    policy
        .run(
            |_| objects.upload(key, body.clone(), PDF_CONTENT_TYPE),
            is_transient_security_error,
        )
        .await?;

    let new_resume = NewResume {
        user_id: user_id.to_string(),
        public_url: objects.public_url(&path),
        file_path: path.clone(),
        ats_score: INITIAL_ATS_SCORE,
    };

    match resumes.insert_resume(&new_resume).await {
        Ok(row) => {
            info!(
                "Stored resume {} for user {} ({:?})",
                row.id, user_id, file.file_name
            );
            Ok(row)
        }
        Err(db_err) => {
            warn!("Resume insert failed for {path}, removing uploaded object");
            if let Err(remove_err) = objects.remove(&path).await {
                error!("Compensating removal of {path} failed: {remove_err}");
            }
            Err(db_err.into())
        }
    }
}
