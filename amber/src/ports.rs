#![deny(clippy::all)]

use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for underlying storage backends

/// Port for the asynchronous record store the cache is layered on.
///
/// Keys and values are opaque strings; the cache lays its two-record
/// convention (value record + expiration record) on top of this interface.
#[async_trait]
pub trait StoreAdapter: Send + Sync + 'static {
    /// Reads a record. An absent key is `Ok(None)`, not an error.
    async fn read(&self, key: &str) -> Result<Option<String>>;
    /// Writes a record, replacing any previous value (idempotent upsert).
    async fn write(&self, key: &str, value: &str) -> Result<()>;
    /// Deletes a record. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
    /// Deletes every record in this adapter's namespace.
    async fn clear(&self) -> Result<()>;
    /// One-shot initialization check, run once through the readiness gate.
    async fn probe(&self) -> Result<()>;
}
