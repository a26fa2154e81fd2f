use sqlx::PgPool;

use super::not_found;
use crate::{
    error::AppResult,
    models::{News, NewsDraft},
};

pub async fn insert(pool: &PgPool, draft: &NewsDraft) -> AppResult<News> {
    let news = sqlx::query_as::<_, News>(
        r#"
        INSERT INTO news (title_en, title_ua, subtitle_en, subtitle_ua, content_en, content_ua, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&draft.title_en)
    .bind(&draft.title_ua)
    .bind(&draft.subtitle_en)
    .bind(&draft.subtitle_ua)
    .bind(&draft.content_en)
    .bind(&draft.content_ua)
    .bind(&draft.image_url)
    .fetch_one(pool)
    .await?;

    Ok(news)
}

pub async fn update(pool: &PgPool, id: i64, draft: &NewsDraft) -> AppResult<News> {
    sqlx::query_as::<_, News>(
        r#"
        UPDATE news
        SET title_en = $2, title_ua = $3, subtitle_en = $4, subtitle_ua = $5,
            content_en = $6, content_ua = $7, image_url = $8, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&draft.title_en)
    .bind(&draft.title_ua)
    .bind(&draft.subtitle_en)
    .bind(&draft.subtitle_ua)
    .bind(&draft.content_en)
    .bind(&draft.content_ua)
    .bind(&draft.image_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<News>)
}
