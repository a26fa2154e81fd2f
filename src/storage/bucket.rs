use aws_sdk_s3::{Client, primitives::ByteStream};
use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::{ObjectInfo, StorageError};

/// Thin wrapper over the S3 API calls shared by both storage adapters.
#[derive(Clone)]
pub(super) struct BucketClient {
    client: Client,
    bucket: String,
}

impl BucketClient {
    pub(super) fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    pub(super) fn bucket(&self) -> &str {
        &self.bucket
    }

    pub(super) async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload(format!("{}: {}", key, e.into_service_error())))?;

        tracing::info!(bucket = %self.bucket, key, "object uploaded");
        Ok(())
    }

    pub(super) async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(format!("{}: {}", key, e.into_service_error())))?;

        tracing::info!(bucket = %self.bucket, key, "object deleted");
        Ok(())
    }

    pub(super) async fn list(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(max_keys)
            .send()
            .await
            .map_err(|e| StorageError::List(e.into_service_error().to_string()))?;

        let objects = output
            .contents()
            .iter()
            .take(max_keys.max(0) as usize)
            .map(|obj| ObjectInfo {
                key: obj.key().unwrap_or_default().to_string(),
                last_modified: obj
                    .last_modified()
                    .and_then(|dt| DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos())),
                size: obj.size().unwrap_or(0),
                // ListObjectsV2 does not report content types
                content_type: None,
            })
            .collect();

        Ok(objects)
    }

    pub(super) async fn exists(&self) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Bucket(format!(
                        "cannot access bucket {}: {}",
                        self.bucket, service_err
                    )))
                }
            }
        }
    }
}
