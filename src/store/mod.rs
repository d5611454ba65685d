// src/store/mod.rs
//
// Generic key-value persistence: every record in the system is one JSON
// value under a prefixed string key. Anything that offers get/set/delete/
// prefix-scan with durable set (plus a transaction for invoice posting)
// can back the API.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    /// Concurrent postings collided; safe to retry.
    Conflict,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // 40001 = serialization_failure, 40P01 = deadlock_detected
        if let sqlx::Error::Database(ref db_err) = err {
            if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
                return StoreError::Conflict;
            }
        }
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All values whose key starts with `prefix`, in unspecified order.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError>;

    /// Opens a transaction for writes that must land together.
    async fn begin(&self) -> Result<Box<dyn KvTransaction>, StoreError>;
}

#[async_trait]
pub trait KvTransaction: Send {
    /// Reads observe the transaction's own earlier writes.
    async fn get(&mut self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Dropping a transaction without committing discards its writes.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Key for a freshly created record: fixed prefix plus millisecond epoch.
pub fn timestamped_key(prefix: &str) -> String {
    format!("{}{}", prefix, chrono::Utc::now().timestamp_millis())
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// The whole dataset lives in a single key/value table.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE TABLE IF NOT EXISTS kv_store (key TEXT PRIMARY KEY, value JSONB NOT NULL)")
        .execute(pool)
        .await?;
    Ok(())
}
