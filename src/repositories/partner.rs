use sqlx::PgPool;

use super::not_found;
use crate::{
    error::AppResult,
    models::{Partner, PartnerDraft},
};

pub async fn insert(pool: &PgPool, draft: &PartnerDraft) -> AppResult<Partner> {
    let partner = sqlx::query_as::<_, Partner>(
        "INSERT INTO partners (name, link, logo) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&draft.name)
    .bind(&draft.link)
    .bind(&draft.logo)
    .fetch_one(pool)
    .await?;

    Ok(partner)
}

pub async fn update(pool: &PgPool, id: i64, draft: &PartnerDraft) -> AppResult<Partner> {
    sqlx::query_as::<_, Partner>(
        r#"
        UPDATE partners SET name = $2, link = $3, logo = $4, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.link)
    .bind(&draft.logo)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<Partner>)
}
