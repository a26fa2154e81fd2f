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
    models::{
        CreatePartnerRequest, PageQuery, Paginated, Partner, PartnerDraft, UpdatePartnerRequest,
    },
    repositories::{self, partner as repo},
    state::AppState,
};

const FOLDER: &str = "partners";

pub async fn list_partners(State(state): State<AppState>) -> AppResult<Json<Vec<Partner>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_partners_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Partner>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_partner(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Partner>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Create a partner; the logo arrives as a base64 data-URL in `logo_data`.
pub async fn create_partner(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePartnerRequest>,
) -> AppResult<(StatusCode, Json<Partner>)> {
    let media = state.media();
    let change = FileChange::from_data_url(Some(req.logo_data)).required("logo_data")?;

    let staged = media.stage(change, "", FOLDER).await?;
    let draft = PartnerDraft {
        name: req.name,
        link: req.link,
        logo: staged.url.clone(),
    };
    let partner = media.commit(staged, repo::insert(&state.pool, &draft)).await?;

    info!(id = partner.id, "Partner created");
    Ok((StatusCode::CREATED, Json(partner)))
}

pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePartnerRequest>,
) -> AppResult<Json<Partner>> {
    let current: Partner = repositories::find_by_id(&state.pool, id).await?;
    let mut draft = PartnerDraft::from(current);
    let change = FileChange::from_data_url(req.apply(&mut draft)?).required("logo_data")?;

    let media = state.media();
    let staged = media.stage(change, &draft.logo, FOLDER).await?;
    draft.logo = staged.url.clone();
    let partner = media.commit(staged, repo::update(&state.pool, id, &draft)).await?;

    info!(id, "Partner updated");
    Ok(Json(partner))
}

pub async fn delete_partner(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Deleted>> {
    let partner: Partner = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<Partner>(&state.pool, id).await?;
    state.media().discard(&partner.logo).await;

    info!(id, "Partner deleted");
    Ok(deleted("Partner"))
}
