use sqlx::PgPool;

use super::not_found;
use crate::{error::AppResult, models::GalleryItem};

pub async fn insert(pool: &PgPool, image_url: &str) -> AppResult<GalleryItem> {
    let item = sqlx::query_as::<_, GalleryItem>(
        "INSERT INTO gallery (image_url) VALUES ($1) RETURNING *",
    )
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn update(pool: &PgPool, id: i64, image_url: &str) -> AppResult<GalleryItem> {
    sqlx::query_as::<_, GalleryItem>(
        r#"
        UPDATE gallery SET image_url = $2, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(image_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<GalleryItem>)
}
