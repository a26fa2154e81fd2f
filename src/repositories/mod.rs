// Row access. Generic reads and deletes live here; inserts and updates are per table.
pub mod contact;
pub mod excursion;
pub mod gallery;
pub mod news;
pub mod partner;
pub mod pdf;
pub mod review;
pub mod user;

use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{Paginated, Pagination, Record},
};

fn live_rows<T: Record>() -> &'static str {
    if T::SOFT_DELETE {
        "deleted_at IS NULL"
    } else {
        "TRUE"
    }
}

pub async fn list_all<T: Record>(pool: &PgPool) -> AppResult<Vec<T>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} ORDER BY id",
        T::TABLE,
        live_rows::<T>()
    );
    Ok(sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?)
}

pub async fn list_page<T: Record>(pool: &PgPool, pagination: Pagination) -> AppResult<Paginated<T>> {
    let count_sql = format!("SELECT COUNT(*) FROM {} WHERE {}", T::TABLE, live_rows::<T>());
    let total = sqlx::query_scalar::<_, i64>(&count_sql).fetch_one(pool).await?;

    let sql = format!(
        "SELECT * FROM {} WHERE {} ORDER BY id LIMIT $1 OFFSET $2",
        T::TABLE,
        live_rows::<T>()
    );
    let rows = sqlx::query_as::<_, T>(&sql)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    Ok(Paginated::new(rows, total, pagination))
}

pub async fn find_by_id<T: Record>(pool: &PgPool, id: i64) -> AppResult<T> {
    let sql = format!(
        "SELECT * FROM {} WHERE id = $1 AND {}",
        T::TABLE,
        live_rows::<T>()
    );
    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<T>())
}

/// Soft-delete (or hard-delete, for tables without `deleted_at`) a live row.
pub async fn delete_by_id<T: Record>(pool: &PgPool, id: i64) -> AppResult<()> {
    let sql = if T::SOFT_DELETE {
        format!(
            "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
            T::TABLE
        )
    } else {
        format!("DELETE FROM {} WHERE id = $1", T::TABLE)
    };

    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(not_found::<T>());
    }
    Ok(())
}

pub(crate) fn not_found<T: Record>() -> AppError {
    AppError::NotFound(format!("{} not found", T::LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, News};

    #[test]
    fn soft_deleted_rows_are_filtered() {
        assert_eq!(live_rows::<News>(), "deleted_at IS NULL");
        assert_eq!(live_rows::<Contact>(), "TRUE");
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = not_found::<Contact>();
        assert_eq!(err.to_string(), "Not found: Contact not found");
    }
}
