use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Record, set_required};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub name_en: String,
    pub name_ua: String,
    pub review_en: String,
    pub review_ua: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for Review {
    const TABLE: &'static str = "reviews";
    const LABEL: &'static str = "Review";
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct ReviewDraft {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "name_en is required"))]
    pub name_en: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "name_ua is required"))]
    pub name_ua: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "review_en is required"))]
    pub review_en: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "review_ua is required"))]
    pub review_ua: String,
}

/// Reviews carry no image, so the create body is the draft itself.
pub type CreateReviewRequest = ReviewDraft;

impl From<Review> for ReviewDraft {
    fn from(r: Review) -> Self {
        Self {
            name_en: r.name_en,
            name_ua: r.name_ua,
            review_en: r.review_en,
            review_ua: r.review_ua,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    pub name_en: Option<String>,
    pub name_ua: Option<String>,
    pub review_en: Option<String>,
    pub review_ua: Option<String>,
}

impl UpdateReviewRequest {
    pub fn apply(self, draft: &mut ReviewDraft) -> AppResult<()> {
        set_required(&mut draft.name_en, self.name_en, "name_en")?;
        set_required(&mut draft.name_ua, self.name_ua, "name_ua")?;
        set_required(&mut draft.review_en, self.review_en, "review_en")?;
        set_required(&mut draft.review_ua, self.review_ua, "review_ua")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_texts_are_required() {
        let req: CreateReviewRequest = serde_json::from_str(
            r#"{"name_en":"Anna","name_ua":"","review_en":"Lovely","review_ua":"Чудово"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn whitespace_only_texts_are_rejected_on_create() {
        let req: CreateReviewRequest = serde_json::from_str(
            r#"{"name_en":"  ","name_ua":"Анна","review_en":"\t","review_ua":"Чудово"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name_en"));
        assert!(errors.field_errors().contains_key("review_en"));
    }

    #[test]
    fn update_changes_one_text() {
        let mut draft = ReviewDraft {
            name_en: "Anna".into(),
            name_ua: "Анна".into(),
            review_en: "Lovely".into(),
            review_ua: "Чудово".into(),
        };
        UpdateReviewRequest {
            review_en: Some("Lovely place".into()),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap();
        assert_eq!(draft.review_en, "Lovely place");
        assert_eq!(draft.name_ua, "Анна");
    }
}
