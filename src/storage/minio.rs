use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_types::region::Region;
use bytes::Bytes;
use serde_json::json;
use tracing::info;

use super::{
    ObjectInfo, Storage, StorageError,
    bucket::BucketClient,
    url::{ObjectUrls, UrlStyle},
};
use crate::config::{StorageConfig, StorageKind};

const DEFAULT_LIST_KEYS: i32 = 1000;

// MinIO storage backend
#[derive(Clone)]
pub struct MinioStorage {
    bucket: BucketClient,
    urls: ObjectUrls,
}

impl MinioStorage {
    /// Build the MinIO client and make sure a publicly readable bucket exists.
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let endpoint_url = config
            .endpoint_url()
            .ok_or_else(|| StorageError::Bucket("MinIO storage requires an endpoint".into()))?;

        let credentials = Credentials::new(
            config.access_key.clone().unwrap_or_default(),
            config.secret_key.clone().unwrap_or_default(),
            None,
            None,
            "minio",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .endpoint_url(endpoint_url)
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(true) // MinIO serves buckets as path segments
            .behavior_version(BehaviorVersion::latest())
            .build();

        let storage = Self {
            bucket: BucketClient::new(Client::from_conf(s3_config), config.bucket.clone()),
            urls: Self::object_urls(config),
        };
        storage.ensure_public_bucket().await?;

        Ok(storage)
    }

    pub fn object_urls(config: &StorageConfig) -> ObjectUrls {
        ObjectUrls::new(
            config.bucket.clone(),
            config.public_url.clone(),
            UrlStyle::PathStyle {
                endpoint: config.endpoint.clone().unwrap_or_default(),
                secure: config.use_ssl,
            },
        )
    }

    /// Create the bucket if it is missing and allow anonymous reads on it.
    async fn ensure_public_bucket(&self) -> Result<(), StorageError> {
        if self.bucket.exists().await? {
            info!(bucket = self.bucket.bucket(), "Bucket already exists");
            return Ok(());
        }

        let client = self.bucket.client();
        let name = self.bucket.bucket();

        if let Err(err) = client.create_bucket().bucket(name).send().await {
            let service_err = err.into_service_error();
            if service_err.is_bucket_already_owned_by_you() || service_err.is_bucket_already_exists() {
                info!(bucket = name, "Bucket created concurrently");
                return Ok(());
            }
            return Err(StorageError::Bucket(format!(
                "failed to create bucket {}: {}",
                name, service_err
            )));
        }

        client
            .put_bucket_policy()
            .bucket(name)
            .policy(public_read_policy(name))
            .send()
            .await
            .map_err(|e| {
                StorageError::Bucket(format!(
                    "failed to set policy on bucket {}: {}",
                    name,
                    e.into_service_error()
                ))
            })?;

        info!(bucket = name, "Bucket created with public read policy");
        Ok(())
    }
}

fn public_read_policy(bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{}/*", bucket)],
        }]
    })
    .to_string()
}

#[async_trait]
impl Storage for MinioStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Minio
    }

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.bucket.put(key, body, content_type).await
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.bucket.delete(key).await
    }

    async fn list_objects(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>, StorageError> {
        let max_keys = if max_keys < 1 { DEFAULT_LIST_KEYS } else { max_keys };
        self.bucket.list(prefix, max_keys).await
    }

    fn object_url(&self, key: &str) -> String {
        self.urls.object_url(key)
    }

    fn object_key(&self, url: &str) -> String {
        self.urls.object_key(url)
    }
}
