use std::sync::OnceLock;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

fn shared_slot() -> &'static Mutex<Option<PgPool>> {
    static SHARED: OnceLock<Mutex<Option<PgPool>>> = OnceLock::new();
    SHARED.get_or_init(|| Mutex::new(None))
}

/// Process-wide pool. Connects on first use; later calls return a clone of
/// the same pool until `close_shared_pool` runs.
pub async fn shared_pool(database_url: &str) -> Result<PgPool> {
    let mut slot = shared_slot().lock().await;
    if let Some(pool) = slot.as_ref() {
        return Ok(pool.clone());
    }
    let pool = create_pool(database_url).await?;
    *slot = Some(pool.clone());
    Ok(pool)
}

/// Closes the shared pool, if one was opened.
pub async fn close_shared_pool() {
    if let Some(pool) = shared_slot().lock().await.take() {
        pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}

/// Creates the `documents` table when missing. Every collection shares it.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id          UUID PRIMARY KEY,
            collection  TEXT NOT NULL,
            data        JSONB NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS documents_collection_created_at_idx
            ON documents (collection, created_at)
        "#,
    )
    .execute(pool)
    .await?;

    info!("Document schema ready");
    Ok(())
}
