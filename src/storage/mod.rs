// Object storage: one trait, an AWS S3 adapter and a MinIO adapter
mod bucket;
mod data_url;
mod minio;
mod s3;
mod url;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub use data_url::DataUrl;
pub use minio::MinioStorage;
pub use s3::S3Storage;
pub use url::{ObjectUrls, UrlStyle};

use crate::{
    config::{StorageConfig, StorageKind},
    utils::get_file_extension,
};

// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String), // Malformed `data:<mime>;base64,<payload>` input

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("Unrecognised object URL: {0}")]
    UnrecognizedUrl(String),

    #[error("Upload Error: {0}")]
    Upload(String),

    #[error("Delete Error: {0}")]
    Delete(String),

    #[error("List Error: {0}")]
    List(String),

    #[error("Bucket Error: {0}")]
    Bucket(String),
}

impl StorageError {
    /// True when the caller sent bad input, as opposed to a backend failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StorageError::InvalidDataUrl(_) | StorageError::InvalidBase64(_))
    }
}

/// Listing entry returned by [`Storage::list_objects`].
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: i64,
    pub content_type: Option<String>,
}

/// A file received through a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

// Async Storage trait
#[async_trait]
pub trait Storage: Send + Sync {
    /// Which backend this is, for logs and health output.
    fn kind(&self) -> StorageKind;

    /// Write `body` under `key`.
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// Remove the object stored under `key`.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// List at most `max_keys` objects whose key starts with `prefix`.
    async fn list_objects(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>, StorageError>;

    /// Public URL of an object.
    fn object_url(&self, key: &str) -> String;

    /// Inverse of [`Storage::object_url`]; unknown input comes back unchanged.
    fn object_key(&self, url: &str) -> String;

    /// Upload a multipart file under `folder` and return its public URL.
    async fn upload_file(&self, file: UploadedFile, folder: &str) -> Result<String, StorageError> {
        let extension = get_file_extension(&file.file_name)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let key = generate_object_key(folder, &extension);
        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        self.put_object(&key, file.data, content_type).await?;
        Ok(self.object_url(&key))
    }

    /// Decode a base64 data-URL, upload it under `folder` and return its public URL.
    async fn upload_base64(&self, data_url: &str, folder: &str) -> Result<String, StorageError> {
        let parsed = DataUrl::parse(data_url)?;
        let key = generate_object_key(folder, &parsed.extension());

        self.put_object(&key, Bytes::from(parsed.data), &parsed.mime_type)
            .await?;
        Ok(self.object_url(&key))
    }

    /// Delete an object given either its key or its public URL.
    async fn delete_file(&self, key_or_url: &str) -> Result<(), StorageError> {
        let key = self.object_key(key_or_url);
        if key.is_empty() || key.contains("://") {
            return Err(StorageError::UnrecognizedUrl(key_or_url.to_string()));
        }
        self.delete_object(&key).await
    }
}

/// Random object key, `<folder>/<uuid><extension>` or `<uuid><extension>`.
pub fn generate_object_key(folder: &str, extension: &str) -> String {
    let filename = format!("{}{}", Uuid::new_v4(), extension);
    let folder = folder.trim_matches('/');

    if folder.is_empty() {
        filename
    } else {
        format!("{}/{}", folder, filename)
    }
}

// Build the configured storage backend
pub async fn init_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match config.kind {
        StorageKind::S3 => {
            info!(bucket = %config.bucket, "Initializing S3 storage");
            Ok(Arc::new(S3Storage::new(config).await?))
        }
        StorageKind::Minio => {
            info!(bucket = %config.bucket, "Initializing MinIO storage");
            Ok(Arc::new(MinioStorage::new(config).await?))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in that records calls and can be told to fail.
    pub(crate) struct RecordingStorage {
        urls: ObjectUrls,
        pub(crate) puts: Mutex<Vec<(String, Bytes, String)>>,
        pub(crate) deletes: Mutex<Vec<String>>,
        pub(crate) fail_puts: bool,
        pub(crate) fail_deletes: bool,
    }

    impl RecordingStorage {
        pub(crate) fn new() -> Self {
            Self {
                urls: ObjectUrls::new(
                    "cows-shelter",
                    None,
                    UrlStyle::PathStyle { endpoint: "minio:9000".into(), secure: false },
                ),
                puts: Mutex::new(Vec::new()),
                deletes: Mutex::new(Vec::new()),
                fail_puts: false,
                fail_deletes: false,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail_puts: true,
                fail_deletes: true,
                ..Self::new()
            }
        }

        pub(crate) fn put_count(&self) -> usize {
            self.puts.lock().unwrap().len()
        }

        pub(crate) fn deleted(&self) -> Vec<String> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Storage for RecordingStorage {
        fn kind(&self) -> StorageKind {
            StorageKind::Minio
        }

        async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
            if self.fail_puts {
                return Err(StorageError::Upload("backend unavailable".into()));
            }
            self.puts
                .lock()
                .unwrap()
                .push((key.to_string(), body, content_type.to_string()));
            Ok(())
        }

        async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_deletes {
                return Err(StorageError::Delete("backend unavailable".into()));
            }
            self.deletes.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn list_objects(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>, StorageError> {
            let puts = self.puts.lock().unwrap();
            Ok(puts
                .iter()
                .filter(|(key, _, _)| key.starts_with(prefix))
                .take(max_keys.max(0) as usize)
                .map(|(key, body, content_type)| ObjectInfo {
                    key: key.clone(),
                    last_modified: None,
                    size: body.len() as i64,
                    content_type: Some(content_type.clone()),
                })
                .collect())
        }

        fn object_url(&self, key: &str) -> String {
            self.urls.object_url(key)
        }

        fn object_key(&self, url: &str) -> String {
            self.urls.object_key(url)
        }
    }
}
