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
        Contact, ContactDraft, CreateContactRequest, PageQuery, Paginated, UpdateContactRequest,
    },
    repositories::{self, contact as repo},
    state::AppState,
};

const FOLDER: &str = "contacts";

pub async fn list_contacts(State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    Ok(Json(repositories::list_all(&state.pool).await?))
}

pub async fn list_contacts_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Contact>>> {
    Ok(Json(repositories::list_page(&state.pool, query.resolve()).await?))
}

pub async fn get_contact(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Contact>> {
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Create a contact. A duplicate email is rejected with 409.
pub async fn create_contact(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let media = state.media();
    let staged = media
        .stage(FileChange::from_data_url(req.image_data), "", FOLDER)
        .await?;

    let draft = ContactDraft {
        name: req.name,
        email: req.email,
        phone: req.phone,
        image_url: staged.url.clone(),
    };
    let contact = media.commit(staged, repo::insert(&state.pool, &draft)).await?;

    info!(id = contact.id, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateContactRequest>,
) -> AppResult<Json<Contact>> {
    let current: Contact = repositories::find_by_id(&state.pool, id).await?;
    let mut draft = ContactDraft::from(current);
    let change = FileChange::from_data_url(req.apply(&mut draft)?);

    let media = state.media();
    let staged = media.stage(change, &draft.image_url, FOLDER).await?;
    draft.image_url = staged.url.clone();
    let contact = media.commit(staged, repo::update(&state.pool, id, &draft)).await?;

    info!(id, "Contact updated");
    Ok(Json(contact))
}

/// Contacts are removed outright rather than soft-deleted.
pub async fn delete_contact(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Deleted>> {
    let contact: Contact = repositories::find_by_id(&state.pool, id).await?;
    repositories::delete_by_id::<Contact>(&state.pool, id).await?;
    state.media().discard(&contact.image_url).await;

    info!(id, "Contact deleted");
    Ok(deleted("Contact"))
}
