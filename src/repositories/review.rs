use sqlx::PgPool;

use super::not_found;
use crate::{
    error::AppResult,
    models::{Review, ReviewDraft},
};

pub async fn insert(pool: &PgPool, draft: &ReviewDraft) -> AppResult<Review> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (name_en, name_ua, review_en, review_ua)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&draft.name_en)
    .bind(&draft.name_ua)
    .bind(&draft.review_en)
    .bind(&draft.review_ua)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

pub async fn update(pool: &PgPool, id: i64, draft: &ReviewDraft) -> AppResult<Review> {
    sqlx::query_as::<_, Review>(
        r#"
        UPDATE reviews
        SET name_en = $2, name_ua = $3, review_en = $4, review_ua = $5, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.name_en)
    .bind(&draft.name_ua)
    .bind(&draft.review_en)
    .bind(&draft.review_ua)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<Review>)
}
