//! In-process `BookStore`, used by tests and by `BOOKS_STORE=memory`.

use super::BookStore;
use crate::error::AppError;
use crate::model::{Book, NewBook};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    books: BTreeMap<i64, Book>,
    next_id: i64,
}

/// Ids come from a counter starting at 1, like a `BIGSERIAL` sequence: a caller-supplied
/// non-zero id does not advance it.
#[derive(Debug)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookStore {
    pub fn new() -> Self {
        MemoryBookStore {
            inner: RwLock::new(Inner {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        let mut inner = self.inner.write().await;
        let id = match book.requested_id() {
            Some(id) => id,
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                id
            }
        };
        if inner.books.contains_key(&id) {
            return Err(AppError::Store(format!("duplicate key: book id {} already exists", id)));
        }
        let now = Utc::now();
        let stored = Book {
            id,
            author: book.author,
            name: book.name,
            page_count: book.page_count,
            created_at: now,
            updated_at: now,
        };
        inner.books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, book: &Book) -> Result<Option<Book>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.books.get_mut(&book.id) else {
            return Ok(None);
        };
        stored.author = book.author.clone();
        stored.name = book.name.clone();
        stored.page_count = book.page_count;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.books.clear();
        inner.next_id = 1;
        Ok(())
    }
}
