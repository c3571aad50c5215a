//! `BookStore` over a shared `PgPool`.

use super::{BookStore, BOOKS_TABLE};
use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, author, name, page_count, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        PgBookStore { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, BOOKS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, BOOKS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        let row = match book.requested_id() {
            Some(id) => {
                let sql = format!(
                    "INSERT INTO {} (id, author, name, page_count) VALUES ($1, $2, $3, $4) RETURNING {}",
                    BOOKS_TABLE, COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as::<_, Book>(&sql)
                    .bind(id)
                    .bind(&book.author)
                    .bind(&book.name)
                    .bind(book.page_count)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "INSERT INTO {} (author, name, page_count) VALUES ($1, $2, $3) RETURNING {}",
                    BOOKS_TABLE, COLUMNS
                );
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, Book>(&sql)
                    .bind(&book.author)
                    .bind(&book.name)
                    .bind(book.page_count)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(row)
    }

    async fn update(&self, book: &Book) -> Result<Option<Book>, AppError> {
        let sql = format!(
            "UPDATE {} SET author = $2, name = $3, page_count = $4, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BOOKS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = book.id, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(book.id)
            .bind(&book.author)
            .bind(&book.name)
            .bind(book.page_count)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", BOOKS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), AppError> {
        let sql = format!("TRUNCATE TABLE {} RESTART IDENTITY", BOOKS_TABLE);
        tracing::debug!(sql = %sql, "query");
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}
