//! Shared application state handed to every route.

use crate::store::BookStoreArc;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: BookStoreArc,
}

impl AppState {
    pub fn new(store: BookStoreArc) -> Self {
        AppState { store }
    }
}
