//! Document store: named collections of JSON documents.
//!
//! Handlers never talk to the database directly; they resolve a typed
//! [`CollectionHandle`] from the shared `Arc<dyn DocumentStore>` in `AppState`.

pub mod collection;
#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

pub use collection::{CollectionHandle, Entity, Record};
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    About,
    Skills,
    Projects,
    Achievements,
    Certifications,
    Education,
    WorkExperience,
    ProfileLinks,
    Layout,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::About,
        Collection::Skills,
        Collection::Projects,
        Collection::Achievements,
        Collection::Certifications,
        Collection::Education,
        Collection::WorkExperience,
        Collection::ProfileLinks,
        Collection::Layout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::About => "about",
            Collection::Skills => "skills",
            Collection::Projects => "projects",
            Collection::Achievements => "achievements",
            Collection::Certifications => "certifications",
            Collection::Education => "education",
            Collection::WorkExperience => "work_experience",
            Collection::ProfileLinks => "profile_links",
            Collection::Layout => "layout",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed document {id} in `{collection}`: {source}")]
    Decode {
        collection: &'static str,
        id: Uuid,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode document for `{collection}`: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD over named collections. Singleton collections (About, Layout) are
/// read with `find_one` and written with `upsert_one`, both unfiltered.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document of the collection, if any.
    async fn find_one(&self, collection: Collection) -> Result<Option<StoredDocument>, StoreError>;

    /// Every document of the collection, newest first.
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError>;

    async fn insert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError>;

    /// Replaces the data of the collection's first document, inserting one
    /// when the collection is empty.
    async fn upsert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError>;

    /// Returns `false` when no document had that id.
    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;
}
