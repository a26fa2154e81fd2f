use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use super::{Record, set_optional, set_required};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Excursion {
    pub id: i64,
    pub title_en: String,
    pub title_ua: String,
    pub description_en: String,
    pub description_ua: String,
    pub time_from: String,
    pub time_to: String,
    pub amount_of_persons: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for Excursion {
    const TABLE: &'static str = "excursions";
    const LABEL: &'static str = "Excursion";
}

/// Text fields of the multipart create form; the image travels as a file part.
#[derive(Debug, Default, Validate)]
pub struct CreateExcursionRequest {
    #[validate(length(min = 1, message = "title_en is required"))]
    pub title_en: String,
    pub title_ua: String,
    #[validate(length(min = 1, message = "description_en is required"))]
    pub description_en: String,
    pub description_ua: String,
    #[validate(length(min = 1, message = "time_from is required"))]
    pub time_from: String,
    #[validate(length(min = 1, message = "time_to is required"))]
    pub time_to: String,
    #[validate(length(min = 1, message = "amount_of_persons is required"))]
    pub amount_of_persons: String,
}

impl From<CreateExcursionRequest> for ExcursionDraft {
    fn from(req: CreateExcursionRequest) -> Self {
        Self {
            title_en: req.title_en,
            title_ua: req.title_ua,
            description_en: req.description_en,
            description_ua: req.description_ua,
            time_from: req.time_from,
            time_to: req.time_to,
            amount_of_persons: req.amount_of_persons,
            image_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExcursionDraft {
    pub title_en: String,
    pub title_ua: String,
    pub description_en: String,
    pub description_ua: String,
    pub time_from: String,
    pub time_to: String,
    pub amount_of_persons: String,
    pub image_url: String,
}

impl From<Excursion> for ExcursionDraft {
    fn from(e: Excursion) -> Self {
        Self {
            title_en: e.title_en,
            title_ua: e.title_ua,
            description_en: e.description_en,
            description_ua: e.description_ua,
            time_from: e.time_from,
            time_to: e.time_to,
            amount_of_persons: e.amount_of_persons,
            image_url: e.image_url,
        }
    }
}

/// Multipart update: a part that was sent replaces the stored value.
#[derive(Debug, Default)]
pub struct UpdateExcursionRequest {
    pub title_en: Option<String>,
    pub title_ua: Option<String>,
    pub description_en: Option<String>,
    pub description_ua: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub amount_of_persons: Option<String>,
}

impl UpdateExcursionRequest {
    pub fn apply(self, draft: &mut ExcursionDraft) -> AppResult<()> {
        set_required(&mut draft.title_en, self.title_en, "title_en")?;
        set_optional(&mut draft.title_ua, self.title_ua);
        set_required(&mut draft.description_en, self.description_en, "description_en")?;
        set_optional(&mut draft.description_ua, self.description_ua);
        set_required(&mut draft.time_from, self.time_from, "time_from")?;
        set_required(&mut draft.time_to, self.time_to, "time_to")?;
        set_required(
            &mut draft.amount_of_persons,
            self.amount_of_persons,
            "amount_of_persons",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_schedule_fails_validation() {
        let req = CreateExcursionRequest {
            title_en: "Farm tour".into(),
            description_en: "Meet the herd".into(),
            amount_of_persons: "10".into(),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("time_from"));
        assert!(fields.contains_key("time_to"));
        assert!(!fields.contains_key("title_en"));
    }

    #[test]
    fn update_touches_only_sent_fields() {
        let mut draft: ExcursionDraft = CreateExcursionRequest {
            title_en: "Farm tour".into(),
            description_en: "Meet the herd".into(),
            time_from: "10:00".into(),
            time_to: "12:00".into(),
            amount_of_persons: "10".into(),
            ..Default::default()
        }
        .into();

        UpdateExcursionRequest {
            time_to: Some("13:00".into()),
            title_ua: Some("Екскурсія".into()),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap();

        assert_eq!(draft.time_from, "10:00");
        assert_eq!(draft.time_to, "13:00");
        assert_eq!(draft.title_ua, "Екскурсія");
        assert_eq!(draft.amount_of_persons, "10");
    }
}
