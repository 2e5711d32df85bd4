use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::store::{Collection, DocumentStore, StoreError, StoredDocument};

/// A content type persisted in its own named collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human-readable name used in action messages.
    const LABEL: &'static str;
}

/// A decoded document: the entity plus the identity the store assigned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

/// Typed view of one collection in the shared store.
pub struct CollectionHandle<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> CollectionHandle<T> {
    pub fn resolve(store: &Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Arc::clone(store),
            _entity: PhantomData,
        }
    }

    fn decode(doc: StoredDocument) -> Result<Record<T>, StoreError> {
        let data = serde_json::from_value(doc.data).map_err(|source| StoreError::Decode {
            collection: T::COLLECTION.name(),
            id: doc.id,
            source,
        })?;
        Ok(Record {
            id: doc.id,
            created_at: doc.created_at,
            data,
        })
    }

    fn encode(entity: &T) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(entity).map_err(|source| StoreError::Encode {
            collection: T::COLLECTION.name(),
            source,
        })
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<Record<T>>, StoreError> {
        self.store
            .find_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn singleton(&self) -> Result<Option<Record<T>>, StoreError> {
        self.store
            .find_one(T::COLLECTION)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn insert(&self, entity: &T) -> Result<Uuid, StoreError> {
        let doc = self
            .store
            .insert_one(T::COLLECTION, Self::encode(entity)?)
            .await?;
        Ok(doc.id)
    }

    pub async fn upsert(&self, entity: &T) -> Result<Uuid, StoreError> {
        let doc = self
            .store
            .upsert_one(T::COLLECTION, Self::encode(entity)?)
            .await?;
        Ok(doc.id)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.store.delete_one(T::COLLECTION, id).await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(T::COLLECTION).await
    }
}
