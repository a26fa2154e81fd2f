// Blob side effects of create/update/delete: upload first, write the row, then clean up.
use std::{collections::HashMap, future::Future};

use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};
use tracing::{error, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    storage::{Storage, UploadedFile},
    utils::{validate_document, validate_image},
};

/// Text parts and file parts of a `multipart/form-data` body, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        // Parse multipart fields
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    // Read file bytes
                    let data = field.bytes().await.map_err(multipart_error)?;

                    // Browsers send an empty, unnamed part when no file was picked
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Text field with surrounding whitespace removed; absent fields read as empty.
    pub fn take_trimmed(&mut self, name: &str) -> String {
        self.take_text(name)
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text());
    }
    error!("Error parsing multipart: {}", err);
    AppError::MultipartError(format!("Failed to parse multipart form: {}", err))
}

/// New content for a blob-backed column.
#[derive(Debug)]
pub enum Upload {
    /// `data:<mime>;base64,<payload>` sent inside a JSON body.
    DataUrl(String),
    /// Image file part.
    Image(UploadedFile),
    /// Document file part, checked against the extension allow-list.
    Document(UploadedFile),
}

/// What a request asks to do with a blob-backed column.
#[derive(Debug)]
pub enum FileChange {
    Keep,
    Clear,
    Replace(Upload),
}

impl FileChange {
    /// JSON field semantics: absent keeps, `""` clears, anything else is a data-URL.
    pub fn from_data_url(value: Option<String>) -> Self {
        match value {
            None => FileChange::Keep,
            Some(v) if v.trim().is_empty() => FileChange::Clear,
            Some(v) => FileChange::Replace(Upload::DataUrl(v)),
        }
    }

    pub fn from_image(file: Option<UploadedFile>) -> Self {
        file.map_or(FileChange::Keep, |f| FileChange::Replace(Upload::Image(f)))
    }

    /// Columns that must always point at a blob cannot be cleared.
    pub fn required(self, field: &str) -> AppResult<Self> {
        match self {
            FileChange::Clear => Err(AppError::BadRequest(format!("{} cannot be empty", field))),
            other => Ok(other),
        }
    }
}

/// Outcome of [`Media::stage`]: the URL to store plus what to clean up afterwards.
#[derive(Debug, Default, PartialEq)]
pub struct StagedFile {
    pub url: String,
    uploaded: Option<String>,
    replaced: Option<String>,
}

/// Storage side of entity writes.
pub struct Media<'a> {
    storage: &'a dyn Storage,
    config: &'a Config,
}

impl<'a> Media<'a> {
    pub fn new(storage: &'a dyn Storage, config: &'a Config) -> Self {
        Self { storage, config }
    }

    /// Upload whatever `change` brings in. Nothing is deleted yet.
    pub async fn stage(&self, change: FileChange, current: &str, folder: &str) -> AppResult<StagedFile> {
        let previous = (!current.is_empty()).then(|| current.to_string());

        match change {
            FileChange::Keep => Ok(StagedFile {
                url: current.to_string(),
                ..Default::default()
            }),
            FileChange::Clear => Ok(StagedFile {
                url: String::new(),
                uploaded: None,
                replaced: previous,
            }),
            FileChange::Replace(upload) => {
                let url = self.upload(upload, folder).await?;
                Ok(StagedFile {
                    url: url.clone(),
                    uploaded: Some(url),
                    replaced: previous,
                })
            }
        }
    }

    async fn upload(&self, upload: Upload, folder: &str) -> AppResult<String> {
        let max_file_size = self.config.max_file_size;

        let url = match upload {
            Upload::DataUrl(data_url) => {
                check_encoded_size(&data_url, max_file_size)?;
                self.storage.upload_base64(&data_url, folder).await?
            }
            Upload::Image(file) => {
                validate_image(&file, max_file_size)?;
                self.storage.upload_file(file, folder).await?
            }
            Upload::Document(file) => {
                validate_document(&file, &self.config.allowed_document_extensions, max_file_size)?;
                self.storage.upload_file(file, folder).await?
            }
        };
        Ok(url)
    }

    /// Await the row write. On success drop the replaced blob, on failure the new one.
    pub async fn commit<T, F>(&self, staged: StagedFile, write: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match write.await {
            Ok(row) => {
                if let Some(old) = staged.replaced {
                    self.discard(&old).await;
                }
                Ok(row)
            }
            Err(err) => {
                if let Some(new) = staged.uploaded {
                    self.discard(&new).await;
                }
                Err(err)
            }
        }
    }

    /// Best-effort delete; failures are logged and swallowed.
    pub async fn discard(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(err) = self.storage.delete_file(url).await {
            warn!(url, error = %err, "Failed to delete stored object");
        }
    }
}

/// Reject data-URLs whose decoded payload would exceed the upload limit.
fn check_encoded_size(data_url: &str, max_file_size: u64) -> AppResult<()> {
    let payload = data_url.split_once(',').map_or("", |(_, p)| p);
    let decoded = (payload.len() as u64 / 4) * 3;
    if decoded > max_file_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size {} exceeds maximum limit of {} bytes",
            decoded, max_file_size
        )));
    }
    Ok(())
}
