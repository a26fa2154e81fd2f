use sqlx::PgPool;

use super::not_found;
use crate::{
    error::AppResult,
    models::{Contact, ContactDraft},
};

pub async fn insert(pool: &PgPool, draft: &ContactDraft) -> AppResult<Contact> {
    let contact = sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (name, email, phone, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.email)
    .bind(&draft.phone)
    .bind(&draft.image_url)
    .fetch_one(pool)
    .await?;

    Ok(contact)
}

pub async fn update(pool: &PgPool, id: i64, draft: &ContactDraft) -> AppResult<Contact> {
    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET name = $2, email = $3, phone = $4, image_url = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.email)
    .bind(&draft.phone)
    .bind(&draft.image_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<Contact>)
}
