//! Book record and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the `books` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub author: String,
    pub name: String,
    pub page_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body. Missing or null fields bind to their zero value; `id` is normally left to the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_count: i32,
}

impl NewBook {
    /// Id to insert with. Zero counts as unset and leaves assignment to the store.
    pub fn requested_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Update body. Only present fields replace stored values.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChanges {
    pub author: Option<String>,
    pub name: Option<String>,
    pub page_count: Option<i32>,
}

impl BookChanges {
    pub fn apply_to(self, book: &mut Book) {
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(name) = self.name {
            book.name = name;
        }
        if let Some(page_count) = self.page_count {
            book.page_count = page_count;
        }
    }
}
