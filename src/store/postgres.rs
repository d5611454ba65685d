use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};

use super::{KvStore, KvTransaction, StoreError};

/// `KvStore` over the `kv_store` table.
pub struct PgKvStore {
    pool: PgPool,
}

impl PgKvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value = sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        let values =
            sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key LIKE $1 || '%'")
                .bind(prefix)
                .fetch_all(&self.pool)
                .await?;
        Ok(values)
    }

    async fn begin(&self) -> Result<Box<dyn KvTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgKvTransaction { tx }))
    }
}

pub struct PgKvTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl KvTransaction for PgKvTransaction {
    async fn get(&mut self, key: &str) -> Result<Option<Value>, StoreError> {
        // Locks the row until commit, so two postings against the same
        // medicine cannot both read the starting quantity.
        let value =
            sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1 FOR UPDATE")
                .bind(key)
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(value)
    }

    async fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(key)
        .bind(value)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
