use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Record, set_required};
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Contact {
    const TABLE: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
    const SOFT_DELETE: bool = false;
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub image_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
}

impl From<Contact> for ContactDraft {
    fn from(c: Contact) -> Self {
        Self {
            name: c.name,
            email: c.email,
            phone: c.phone,
            image_url: c.image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_data: Option<String>,
}

impl UpdateContactRequest {
    pub fn apply(self, draft: &mut ContactDraft) -> AppResult<Option<String>> {
        set_required(&mut draft.name, self.name, "name")?;
        set_required(&mut draft.email, self.email, "email")?;
        set_required(&mut draft.phone, self.phone, "phone")?;
        Ok(self.image_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_be_valid() {
        let req: CreateContactRequest =
            serde_json::from_str(r#"{"name":"Olena","email":"not-an-email","phone":"+380"}"#)
                .unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn update_email_is_validated_when_present() {
        let req = UpdateContactRequest::default();
        assert!(req.validate().is_ok());

        let req = UpdateContactRequest {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
