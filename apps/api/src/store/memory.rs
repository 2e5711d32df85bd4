//! In-process `DocumentStore` for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Collection, DocumentStore, StoreError, StoredDocument};

/// Documents kept in insertion order. `set_failing(true)` makes every call
/// return `StoreError::Unavailable`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<Vec<(Collection, StoredDocument)>>,
    failing: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store set to fail".into()))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Collection, StoredDocument)>> {
        self.docs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn new_document(data: Value) -> StoredDocument {
    let now = Utc::now();
    StoredDocument {
        id: Uuid::new_v4(),
        data,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, collection: Collection) -> Result<Option<StoredDocument>, StoreError> {
        self.check()?;
        Ok(self
            .lock()
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, d)| d.clone()))
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        self.check()?;
        Ok(self
            .lock()
            .iter()
            .rev()
            .filter(|(c, _)| *c == collection)
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError> {
        self.check()?;
        let doc = new_document(data);
        self.lock().push((collection, doc.clone()));
        Ok(doc)
    }

    async fn upsert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError> {
        self.check()?;
        let mut docs = self.lock();
        if let Some((_, existing)) = docs.iter_mut().find(|(c, _)| *c == collection) {
            existing.data = data;
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        let doc = new_document(data);
        docs.push((collection, doc.clone()));
        Ok(doc)
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        self.check()?;
        let mut docs = self.lock();
        let before = docs.len();
        docs.retain(|(c, d)| !(*c == collection && d.id == id));
        Ok(docs.len() < before)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.lock().iter().filter(|(c, _)| *c == collection).count() as u64)
    }
}
