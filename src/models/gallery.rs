use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Record;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryItem {
    pub id: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for GalleryItem {
    const TABLE: &'static str = "gallery";
    const LABEL: &'static str = "Gallery item";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGalleryRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "image_data is required"))]
    pub image_data: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGalleryRequest {
    /// A data-URL replaces the image; absent keeps it. The image cannot be removed.
    pub image_data: Option<String>,
}
