use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::Record;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Pdf {
    pub id: i64,
    pub title: String,
    pub document_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for Pdf {
    const TABLE: &'static str = "pdfs";
    const LABEL: &'static str = "PDF";
}
