//! Postgres-backed [`DocumentStore`] over the `documents` table.

use sqlx::PgPool;

use crate::{DocumentPath, DocumentStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DocumentStore for PgDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<serde_json::Value>, StoreError> {
        let data = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT data FROM documents WHERE path = $1",
        )
        .bind(path.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(data)
    }

    async fn set(&self, path: &DocumentPath, data: &serde_json::Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (path, collection, doc_id, data) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (path) DO UPDATE SET \
                 data       = EXCLUDED.data, \
                 updated_at = NOW()",
        )
        .bind(path.as_str())
        .bind(path.collection())
        .bind(path.doc_id())
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_under(&self, prefix: &str) -> Result<u64, StoreError> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let count: i64 =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE starts_with(path, $1)")
                .bind(prefix)
                .fetch_one(&self.pool)
                .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
