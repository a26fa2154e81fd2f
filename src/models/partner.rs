use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Record, set_optional, set_required};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub link: String,
    /// Public URL of the uploaded logo.
    pub logo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record for Partner {
    const TABLE: &'static str = "partners";
    const LABEL: &'static str = "Partner";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "logo_data is required"))]
    pub logo_data: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDraft {
    pub name: String,
    pub link: String,
    pub logo: String,
}

impl From<Partner> for PartnerDraft {
    fn from(p: Partner) -> Self {
        Self {
            name: p.name,
            link: p.link,
            logo: p.logo,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    pub link: Option<String>,
    pub logo_data: Option<String>,
}

impl UpdatePartnerRequest {
    pub fn apply(self, draft: &mut PartnerDraft) -> AppResult<Option<String>> {
        set_required(&mut draft.name, self.name, "name")?;
        set_optional(&mut draft.link, self.link);
        Ok(self.logo_data)
    }
}
