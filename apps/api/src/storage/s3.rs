use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use crate::config::Config;
use crate::storage::{public_object_url, ObjectStore, StorageError};

/// Object store backed by the hosted backend's S3-compatible endpoint.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.storage_access_key_id,
            &config.storage_secret_access_key,
            None,
            None,
            "careerai-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.storage_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.storage_endpoint)
            .load()
            .await;

        // The hosted endpoint only understands path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        info!(
            "S3 client initialized for bucket '{}' at {}",
            config.storage_bucket, config.storage_endpoint
        );

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.storage_bucket.clone(),
            public_base_url: config.supabase_url.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .cache_control("max-age=3600")
            // Create-only: an existing key is never replaced.
            .if_none_match("*")
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                path: path.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!("Uploaded s3://{}/{}", self.bucket, path);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::Remove {
                path: path.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!("Removed s3://{}/{}", self.bucket, path);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| StorageError::List {
                    prefix: prefix.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match page.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        debug!("Listed {} objects under '{}'", keys.len(), prefix);
        Ok(keys)
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.public_base_url, &self.bucket, path)
    }
}
