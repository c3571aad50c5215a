//! Book handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::{BookChanges, NewBook};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub const NO_BOOKS: &str = "there is no book in db";
pub const RECORD_NOT_EXISTS: &str = "record not exists";
pub const RECORD_DELETED: &str = "record deleted successfully";

/// Path ids arrive as text; a non-integer id fails the lookup like any other store error.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|source| AppError::MalformedId {
        id: id_str.to_string(),
        source,
    })
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state.store.list().await?;
    if books.is_empty() {
        return Err(AppError::NotFound(NO_BOOKS.into()));
    }
    Ok((StatusCode::OK, Json(books)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let book = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_BOOKS.into()))?;
    Ok((StatusCode::OK, Json(book)))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::EmptyBody);
    }
    let new_book: NewBook = serde_json::from_slice(&body)?;
    let book = state.store.create(new_book).await.map_err(|e| {
        tracing::warn!(error = %e, "create book failed");
        e
    })?;
    tracing::info!(id = book.id, "book created");
    Ok((StatusCode::OK, Json(book)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut book = match state.store.get_by_id(id).await {
        Ok(Some(book)) => book,
        Ok(None) => return Err(AppError::NotFound(RECORD_NOT_EXISTS.into())),
        Err(e) => {
            tracing::warn!(id, error = %e, "lookup before update failed");
            return Err(e);
        }
    };
    let changes: BookChanges = serde_json::from_slice(&body)?;
    changes.apply_to(&mut book);
    let updated = state
        .store
        .update(&book)
        .await
        .map_err(|e| {
            tracing::warn!(id, error = %e, "update book failed");
            e
        })?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_EXISTS.into()))?;
    Ok((StatusCode::OK, Json(updated)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    match state.store.get_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(AppError::NotFound(RECORD_NOT_EXISTS.into())),
        Err(e) => {
            tracing::warn!(id, error = %e, "lookup before delete failed");
            return Err(e);
        }
    }
    let removed = state.store.delete(id).await.map_err(|e| {
        tracing::warn!(id, error = %e, "delete book failed");
        e
    })?;
    if !removed {
        return Err(AppError::NotFound(RECORD_NOT_EXISTS.into()));
    }
    tracing::info!(id, "book deleted");
    Ok((StatusCode::OK, Json(RECORD_DELETED)))
}
