//! Books API: CRUD over a single `books` table, served with axum.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{Book, BookChanges, NewBook};
pub use routes::book_routes;
pub use state::AppState;
pub use store::{ensure_books_table, ensure_database_exists, BookStore, BookStoreArc, MemoryBookStore, PgBookStore};
