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
    models::{CreateReviewRequest, PageQuery, Paginated, Review, ReviewDraft, UpdateReviewRequest},
    repositories::{self, review as repo},
    state::AppState,
};

pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_reviews_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Review>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_review(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Review>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = repo::insert(&state.pool, &req).await?;

    info!(id = review.id, "Review created");
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateReviewRequest>,
) -> AppResult<Json<Review>> {
    let current: Review = repositories::find_by_id(&state.pool, id).await?;
    let mut draft = ReviewDraft::from(current);
    req.apply(&mut draft)?;

    let review = repo::update(&state.pool, id, &draft).await?;

    info!(id, "Review updated");
    Ok(Json(review))
}

pub async fn delete_review(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Deleted>> {
    repositories::delete_by_id::<Review>(&state.pool, id).await?;

    info!(id, "Review deleted");
    Ok(deleted("Review"))
}
