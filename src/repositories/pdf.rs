use sqlx::PgPool;

use super::not_found;
use crate::{error::AppResult, models::Pdf};

pub async fn insert(pool: &PgPool, title: &str, document_url: &str) -> AppResult<Pdf> {
    let pdf = sqlx::query_as::<_, Pdf>(
        "INSERT INTO pdfs (title, document_url) VALUES ($1, $2) RETURNING *",
    )
    .bind(title)
    .bind(document_url)
    .fetch_one(pool)
    .await?;

    Ok(pdf)
}

pub async fn update(pool: &PgPool, id: i64, title: &str, document_url: &str) -> AppResult<Pdf> {
    sqlx::query_as::<_, Pdf>(
        r#"
        UPDATE pdfs SET title = $2, document_url = $3, updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(document_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found::<Pdf>)
}
