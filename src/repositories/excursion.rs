use sqlx::PgPool;

use super::not_found;
use crate::{
    error::AppResult,
    models::{Excursion, ExcursionDraft},
};

pub async fn insert(pool: &PgPool, draft: &ExcursionDraft) -> AppResult<Excursion> {
    let excursion = sqlx::query_as::<_, Excursion>(
        r#"
        INSERT INTO excursions (
            title_en, title_ua, description_en, description_ua,
            time_from, time_to, amount_of_persons, image_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&draft.title_en)
    .bind(&draft.title_ua)
    .bind(&draft.description_en)
    .bind(&draft.description_ua)
    .bind(&draft.time_from)
    .bind(&draft.time_to)
    .bind(&draft.amount_of_persons)
    .bind(&draft.image_url)
    .fetch_one(pool)
    .await?;

    Ok(excursion)
}

pub async fn update(pool: &PgPool, id: i64, draft: &ExcursionDraft) -> AppResult<Excursion> {
    sqlx::query_as::<_, Excursion>(
        r#"
        UPDATE excursions
        SET title_en = $2, title_ua = $3, description_en = $4, description_ua = $5,
            time_from = $6, time_to = $7, amount_of_persons = $8, image_url = $9,
            updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.title_en)
    .bind(&draft.title_ua)
    .bind(&draft.description_en)
    .bind(&draft.description_ua)
    .bind(&draft.time_from)
    .bind(&draft.time_to)
    .bind(&draft.amount_of_persons)
    .bind(&draft.image_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<Excursion>)
}
