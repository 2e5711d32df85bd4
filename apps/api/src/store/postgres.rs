use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::store::{Collection, DocumentStore, StoreError, StoredDocument};

/// PostgreSQL-backed store: every collection lives in the `documents` table,
/// partitioned by the `collection` column, with the entity as JSONB.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: Collection) -> Result<Option<StoredDocument>, StoreError> {
        Ok(sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError> {
        let doc = sqlx::query_as::<_, StoredDocument>(
            r#"
            INSERT INTO documents (id, collection, data)
            VALUES ($1, $2, $3)
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection.name())
        .bind(data)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted document {} into {}", doc.id, collection.name());
        Ok(doc)
    }

    async fn upsert_one(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<StoredDocument, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Serialise concurrent first-time upserts so a singleton never gets two rows.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection.name())
            .execute(&mut *tx)
            .await?;

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM documents WHERE collection = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(collection.name())
        .fetch_optional(&mut *tx)
        .await?;

        let doc = match existing {
            Some(id) => {
                sqlx::query_as::<_, StoredDocument>(
                    r#"
                    UPDATE documents
                    SET data = $1, updated_at = NOW()
                    WHERE id = $2
                    RETURNING id, data, created_at, updated_at
                    "#,
                )
                .bind(data)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, StoredDocument>(
                    r#"
                    INSERT INTO documents (id, collection, data)
                    VALUES ($1, $2, $3)
                    RETURNING id, data, created_at, updated_at
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(collection.name())
                .bind(data)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        debug!("Upserted {} document {}", collection.name(), doc.id);
        Ok(doc)
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection.name())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
