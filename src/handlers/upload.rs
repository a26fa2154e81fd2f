use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    media::{FileChange, MultipartForm},
    state::AppState,
};

const FOLDER: &str = "uploads";

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub image_url: String,
}

/// Store a standalone image (`image` part) and return its public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadImageResponse>)> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_file("image")
        .ok_or_else(|| AppError::BadRequest("No image provided".into()))?;

    let staged = state
        .media()
        .stage(FileChange::from_image(Some(file)), "", FOLDER)
        .await?;

    info!(url = %staged.url, "Image uploaded");
    Ok((
        StatusCode::CREATED,
        Json(UploadImageResponse {
            image_url: staged.url,
        }),
    ))
}
