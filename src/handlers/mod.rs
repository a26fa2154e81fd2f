pub mod auth;
pub mod contacts;
pub mod excursions;
pub mod gallery;
pub mod health;
pub mod news;
pub mod partners;
pub mod pdfs;
pub mod reviews;
pub mod upload;

use axum::Json;
use serde::Serialize;

/// Body returned by every delete endpoint.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
}

pub(crate) fn deleted(what: &str) -> Json<Deleted> {
    Json(Deleted {
        message: format!("{} deleted successfully", what),
    })
}
