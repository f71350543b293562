//! Bucket-scoped object storage.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod s3;

pub use s3::S3ObjectStore;

/// Storage failures carry the backend's message verbatim; the upload retry
/// predicate inspects it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of '{path}' failed: {message}")]
    Upload { path: String, message: String },

    #[error("removal of '{path}' failed: {message}")]
    Remove { path: String, message: String },

    #[error("listing '{prefix}' failed: {message}")]
    List { prefix: String, message: String },
}

impl StorageError {
    pub fn message(&self) -> &str {
        match self {
            StorageError::Upload { message, .. }
            | StorageError::Remove { message, .. }
            | StorageError::List { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create-only: fails with `StorageError::Upload` if `path` already exists.
    async fn upload(&self, path: &str, body: Bytes, content_type: &str)
        -> Result<(), StorageError>;

    async fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Keys under `prefix`, in backend order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    fn public_url(&self, path: &str) -> String;
}

/// `<base>/storage/v1/object/public/<bucket>/<path>`
pub fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path.trim_start_matches('/')
    )
}
