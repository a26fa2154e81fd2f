use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use super::{Deleted, deleted};
use crate::{
    error::AppResult,
    media::{FileChange, MultipartForm},
    models::{
        CreateExcursionRequest, Excursion, ExcursionDraft, PageQuery, Paginated,
        UpdateExcursionRequest,
    },
    repositories::{self, excursion as repo},
    state::AppState,
};

const FOLDER: &str = "excursions";

pub async fn list_excursions(State(state): State<AppState>) -> AppResult<Json<Vec<Excursion>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_excursions_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Excursion>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_excursion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Excursion>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Create an excursion from a multipart form with an optional `image` file.
pub async fn create_excursion(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Excursion>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let req = CreateExcursionRequest {
        title_en: form.take_trimmed("title_en"),
        title_ua: form.take_trimmed("title_ua"),
        description_en: form.take_trimmed("description_en"),
        description_ua: form.take_trimmed("description_ua"),
        time_from: form.take_trimmed("time_from"),
        time_to: form.take_trimmed("time_to"),
        amount_of_persons: form.take_trimmed("amount_of_persons"),
    };
    req.validate()?;

    let media = state.media();
    let mut draft = ExcursionDraft::from(req);
    let staged = media
        .stage(FileChange::from_image(form.take_file("image")), "", FOLDER)
        .await?;
    draft.image_url = staged.url.clone();
    let excursion = media.commit(staged, repo::insert(&state.pool, &draft)).await?;

    info!(id = excursion.id, "Excursion created");
    Ok((StatusCode::CREATED, Json(excursion)))
}

pub async fn update_excursion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Excursion>> {
    let current: Excursion = repositories::find_by_id(&state.pool, id).await?;
    let mut form = MultipartForm::read(multipart).await?;

    let mut draft = ExcursionDraft::from(current);
    UpdateExcursionRequest {
        title_en: form.take_text("title_en"),
        title_ua: form.take_text("title_ua"),
        description_en: form.take_text("description_en"),
        description_ua: form.take_text("description_ua"),
        time_from: form.take_text("time_from"),
        time_to: form.take_text("time_to"),
        amount_of_persons: form.take_text("amount_of_persons"),
    }
    .apply(&mut draft)?;

    let media = state.media();
    let staged = media
        .stage(
            FileChange::from_image(form.take_file("image")),
            &draft.image_url,
            FOLDER,
        )
        .await?;
    draft.image_url = staged.url.clone();
    let excursion = media
        .commit(staged, repo::update(&state.pool, id, &draft))
        .await?;

    info!(id, "Excursion updated");
    Ok(Json(excursion))
}

pub async fn delete_excursion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Deleted>> {
    let excursion: Excursion = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<Excursion>(&state.pool, id).await?;
    state.media().discard(&excursion.image_url).await;

    info!(id, "Excursion deleted");
    Ok(deleted("Excursion"))
}
