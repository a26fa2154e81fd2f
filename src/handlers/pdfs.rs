use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::info;

use super::{Deleted, deleted};
use crate::{
    error::{AppError, AppResult},
    media::{FileChange, MultipartForm, Upload},
    models::{PageQuery, Paginated, Pdf, set_required},
    repositories::{self, pdf as repo},
    state::AppState,
};

const FOLDER: &str = "documents";

pub async fn list_pdfs(State(state): State<AppState>) -> AppResult<Json<Vec<Pdf>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_pdfs_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Pdf>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_pdf(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Pdf>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Upload a document (`document` part) with its `title`.
pub async fn create_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Pdf>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let title = form
        .take_text("title")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".into()))?;
    let document = form
        .take_file("document")
        .ok_or_else(|| AppError::BadRequest("No document provided".into()))?;

    let media = state.media();
    let staged = media
        .stage(FileChange::Replace(Upload::Document(document)), "", FOLDER)
        .await?;
    let url = staged.url.clone();
    let pdf = media.commit(staged, repo::insert(&state.pool, &title, &url)).await?;

    info!(id = pdf.id, "PDF created");
    Ok((StatusCode::CREATED, Json(pdf)))
}

/// Rename a document and/or replace its file.
pub async fn update_pdf(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Pdf>> {
    let current: Pdf = repositories::find_by_id(&state.pool, id).await?;
    let mut form = MultipartForm::read(multipart).await?;

    let mut title = current.title;
    set_required(&mut title, form.take_text("title"), "title")?;

    let change = form
        .take_file("document")
        .map_or(FileChange::Keep, |f| FileChange::Replace(Upload::Document(f)));

    let media = state.media();
    let staged = media.stage(change, &current.document_url, FOLDER).await?;
    let url = staged.url.clone();
    let pdf = media.commit(staged, repo::update(&state.pool, id, &title, &url)).await?;

    info!(id, "PDF updated");
    Ok(Json(pdf))
}

pub async fn delete_pdf(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Deleted>> {
    let pdf: Pdf = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<Pdf>(&state.pool, id).await?;
    state.media().discard(&pdf.document_url).await;

    info!(id, "PDF deleted");
    Ok(deleted("PDF"))
}
