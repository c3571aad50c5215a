//! Book persistence: the `BookStore` seam, its PostgreSQL and in-memory implementations,
//! and startup DDL for the `books` table.

use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

pub const BOOKS_TABLE: &str = "books";

/// Data access for book records.
///
/// Handlers check existence with `get_by_id` before `update`/`delete`; those two still
/// re-check in the same statement and report a vanished row as `None`/`false`.
#[async_trait]
pub trait BookStore: Debug + Send + Sync {
    /// All records, ordered by id. Empty is not an error.
    async fn list(&self) -> Result<Vec<Book>, AppError>;

    /// `None` when no record has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Insert and return the stored record. A supplied `id` is used verbatim.
    async fn create(&self, book: NewBook) -> Result<Book, AppError>;

    /// Overwrite author, name and page count of `book.id`. `None` if the row is gone.
    async fn update(&self, book: &Book) -> Result<Option<Book>, AppError>;

    /// Remove the record. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Remove every record and restart id assignment at 1.
    async fn clear(&self) -> Result<(), AppError>;
}

pub type BookStoreArc = Arc<dyn BookStore>;

/// Create the `books` table if it does not exist.
pub async fn ensure_books_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            author TEXT NOT NULL,
            name TEXT NOT NULL,
            page_count INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        BOOKS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` admin database and create the target database when missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a URL into (admin URL pointing at `postgres`, database name). Query string is kept.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Store("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
