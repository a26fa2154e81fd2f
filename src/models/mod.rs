pub mod contact;
pub mod excursion;
pub mod gallery;
pub mod news;
pub mod partner;
pub mod pdf;
pub mod review;
pub mod user;

pub use contact::*;
pub use excursion::*;
pub use gallery::*;
pub use news::*;
pub use partner::*;
pub use pdf::*;
pub use review::*;
pub use user::*;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, postgres::PgRow};

use crate::error::{AppError, AppResult};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// A table-backed row the generic repository can list, fetch and delete.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Human-readable name used in messages ("News", "Partner").
    const LABEL: &'static str;
    /// Rows are hidden with `deleted_at` instead of being removed.
    const SOFT_DELETE: bool = true;
}

/// Raw `?page=&limit=` query. Values are kept as text so junk falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn resolve(&self) -> Pagination {
        Pagination {
            page: positive_or(self.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(self.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

fn positive_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Paged listing envelope.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            data,
            total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: (total + pagination.limit - 1) / pagination.limit,
        }
    }
}

/// Required create fields go through this so whitespace-only input fails `length(min = 1)`.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Replace a required field if a value was sent. Blank values are rejected.
pub(crate) fn set_required(
    target: &mut String,
    value: Option<String>,
    field: &str,
) -> AppResult<()> {
    if let Some(value) = value {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::BadRequest(format!("{} cannot be empty", field)));
        }
        *target = value.to_string();
    }
    Ok(())
}

/// Replace an optional field if a value was sent; an empty value clears it.
pub(crate) fn set_optional(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}
