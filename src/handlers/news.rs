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
    models::{CreateNewsRequest, News, NewsDraft, PageQuery, Paginated, UpdateNewsRequest},
    repositories::{self, news as repo},
    state::AppState,
};

const FOLDER: &str = "news";

pub async fn list_news(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_news_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<News>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_news(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<News>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Create a news item with an optional base64 cover image.
pub async fn create_news(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateNewsRequest>,
) -> AppResult<(StatusCode, Json<News>)> {
    let media = state.media();
    let image = FileChange::from_data_url(req.image_data.clone());
    let mut draft = req.into_draft();

    let staged = media.stage(image, "", FOLDER).await?;
    draft.image_url = staged.url.clone();
    let news = media.commit(staged, repo::insert(&state.pool, &draft)).await?;

    info!(id = news.id, "News created");
    Ok((StatusCode::CREATED, Json(news)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateNewsRequest>,
) -> AppResult<Json<News>> {
    let current: News = repositories::find_by_id(&state.pool, id).await?;
    let mut draft = NewsDraft::from(current);
    let image = FileChange::from_data_url(req.apply(&mut draft)?);

    let media = state.media();
    let staged = media.stage(image, &draft.image_url, FOLDER).await?;
    draft.image_url = staged.url.clone();
    let news = media.commit(staged, repo::update(&state.pool, id, &draft)).await?;

    info!(id, "News updated");
    Ok(Json(news))
}

pub async fn delete_news(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Deleted>> {
    let news: News = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<News>(&state.pool, id).await?;
    state.media().discard(&news.image_url).await;

    info!(id, "News deleted");
    Ok(deleted("News item"))
}
