use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;

use super::{Deleted, deleted};
use crate::{
    error::AppResult,
    extract::ValidatedJson,
    media::FileChange,
    models::{CreateGalleryRequest, GalleryItem, PageQuery, Paginated, UpdateGalleryRequest},
    repositories::{self, gallery as repo},
    state::AppState,
};

const FOLDER: &str = "gallery";

pub async fn list_gallery(State(state): State<AppState>) -> AppResult<Json<Vec<GalleryItem>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_gallery_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<GalleryItem>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<GalleryItem>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

pub async fn create_gallery_item(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateGalleryRequest>,
) -> AppResult<(StatusCode, Json<GalleryItem>)> {
    let media = state.media();
    let change = FileChange::from_data_url(Some(req.image_data)).required("image_data")?;

    let staged = media.stage(change, "", FOLDER).await?;
    let url = staged.url.clone();
    let item = media.commit(staged, repo::insert(&state.pool, &url)).await?;

    info!(id = item.id, "Gallery item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateGalleryRequest>,
) -> AppResult<Json<GalleryItem>> {
    let current: GalleryItem = repositories::find_by_id(&state.pool, id).await?;
    let change = FileChange::from_data_url(req.image_data).required("image_data")?;

    let media = state.media();
    let staged = media.stage(change, &current.image_url, FOLDER).await?;
    let url = staged.url.clone();
    let item = media.commit(staged, repo::update(&state.pool, id, &url)).await?;

    info!(id, "Gallery item updated");
    Ok(Json(item))
}

pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Deleted>> {
    let item: GalleryItem = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<GalleryItem>(&state.pool, id).await?;
    state.media().discard(&item.image_url).await;

    info!(id, "Gallery item deleted");
    Ok(deleted("Gallery item"))
}
