//! Route table for the book resource.

use crate::handlers::book::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET/POST `/` and GET/PUT/DELETE `/:id`.
pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
