use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Record, set_optional, set_required};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct News {
    pub id: i64,
    pub title_en: String,
    pub title_ua: String,
    pub subtitle_en: String,
    pub subtitle_ua: String,
    pub content_en: String,
    pub content_ua: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for News {
    const TABLE: &'static str = "news";
    const LABEL: &'static str = "News";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "title_en is required"))]
    pub title_en: String,
    #[serde(default)]
    pub title_ua: String,
    #[serde(default)]
    pub subtitle_en: String,
    #[serde(default)]
    pub subtitle_ua: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "content_en is required"))]
    pub content_en: String,
    #[serde(default)]
    pub content_ua: String,
    /// Base64 data-URL of the cover image.
    pub image_data: Option<String>,
}

impl CreateNewsRequest {
    /// Row values before the image is attached and the row is inserted.
    pub fn into_draft(self) -> NewsDraft {
        NewsDraft {
            title_en: self.title_en,
            title_ua: self.title_ua,
            subtitle_en: self.subtitle_en,
            subtitle_ua: self.subtitle_ua,
            content_en: self.content_en,
            content_ua: self.content_ua,
            image_url: String::new(),
        }
    }
}

/// Column values written on insert and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    pub title_en: String,
    pub title_ua: String,
    pub subtitle_en: String,
    pub subtitle_ua: String,
    pub content_en: String,
    pub content_ua: String,
    pub image_url: String,
}

impl From<News> for NewsDraft {
    fn from(news: News) -> Self {
        Self {
            title_en: news.title_en,
            title_ua: news.title_ua,
            subtitle_en: news.subtitle_en,
            subtitle_ua: news.subtitle_ua,
            content_en: news.content_en,
            content_ua: news.content_ua,
            image_url: news.image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateNewsRequest {
    pub title_en: Option<String>,
    pub title_ua: Option<String>,
    pub subtitle_en: Option<String>,
    pub subtitle_ua: Option<String>,
    pub content_en: Option<String>,
    pub content_ua: Option<String>,
    /// Absent keeps the image, `""` removes it, a data-URL replaces it.
    pub image_data: Option<String>,
}

impl UpdateNewsRequest {
    /// Merge the text fields into `draft`, leaving the image to the caller.
    pub fn apply(self, draft: &mut NewsDraft) -> AppResult<Option<String>> {
        set_required(&mut draft.title_en, self.title_en, "title_en")?;
        set_optional(&mut draft.title_ua, self.title_ua);
        set_optional(&mut draft.subtitle_en, self.subtitle_en);
        set_optional(&mut draft.subtitle_ua, self.subtitle_ua);
        set_required(&mut draft.content_en, self.content_en, "content_en")?;
        set_optional(&mut draft.content_ua, self.content_ua);
        Ok(self.image_data)
    }
}
