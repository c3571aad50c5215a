//! Books server: reads `.env` and the environment, prepares the store, serves the book routes.
//!
//! Run from repo root: `cargo run -p books-server`

use books_api::{
    book_routes, ensure_books_table, ensure_database_exists, AppState, BookStoreArc, Config,
    MemoryBookStore, PgBookStore, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("books_api=info,books_server=info")),
        )
        .init();

    let config = Config::from_env()?;
    let store: BookStoreArc = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_books_table(&pool).await?;
            Arc::new(PgBookStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; records are lost on exit");
            Arc::new(MemoryBookStore::new())
        }
    };

    let app = book_routes(AppState::new(store));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
