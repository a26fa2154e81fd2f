use async_trait::async_trait;
use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_types::region::Region;
use bytes::Bytes;
use tracing::info;

use super::{
    ObjectInfo, Storage, StorageError,
    bucket::BucketClient,
    url::{ObjectUrls, UrlStyle},
};
use crate::config::{StorageConfig, StorageKind};

const MAX_LIST_KEYS: i32 = 1000;

// AWS S3 (or any S3-compatible endpoint) storage backend
#[derive(Clone)]
pub struct S3Storage {
    bucket: BucketClient,
    urls: ObjectUrls,
}

impl S3Storage {
    /// Build the S3 client and verify the bucket is reachable.
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region_provider = RegionProviderChain::first_try(Region::new(config.region.clone()))
            .or_default_provider()
            .or_else(Region::new("us-east-1"));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        // Custom endpoint (e.g. a self-hosted S3-compatible service)
        if let Some(endpoint_url) = config.endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        // Explicit keys win over the default credential chain
        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "static",
            ));
        }

        let sdk_config = loader.load().await;
        let client = Client::from_conf(
            aws_sdk_s3::config::Builder::from(&sdk_config)
                .force_path_style(config.endpoint.is_some())
                .build(),
        );

        let bucket = BucketClient::new(client, config.bucket.clone());
        if !bucket.exists().await? {
            return Err(StorageError::Bucket(format!(
                "bucket {} does not exist or is not accessible",
                config.bucket
            )));
        }
        info!(bucket = %config.bucket, "S3 bucket verified");

        Ok(Self {
            bucket,
            urls: Self::object_urls(config),
        })
    }

    /// Path-style URLs behind a custom endpoint, virtual-hosted URLs on AWS.
    pub fn object_urls(config: &StorageConfig) -> ObjectUrls {
        let style = match &config.endpoint {
            Some(endpoint) => UrlStyle::PathStyle {
                endpoint: endpoint.clone(),
                secure: config.use_ssl,
            },
            None => UrlStyle::VirtualHosted {
                region: config.region.clone(),
            },
        };
        ObjectUrls::new(config.bucket.clone(), config.public_url.clone(), style)
    }
}

#[async_trait]
impl Storage for S3Storage {
    fn kind(&self) -> StorageKind {
        StorageKind::S3
    }

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.bucket.put(key, body, content_type).await
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.bucket.delete(key).await
    }

    async fn list_objects(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>, StorageError> {
        self.bucket
            .list(prefix, max_keys.clamp(1, MAX_LIST_KEYS))
            .await
    }

    fn object_url(&self, key: &str) -> String {
        self.urls.object_url(key)
    }

    fn object_key(&self, url: &str) -> String {
        self.urls.object_key(url)
    }
}
