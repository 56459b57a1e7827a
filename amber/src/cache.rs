use std::sync::Arc;

use serde::Serialize;
use shared::{warnings_enabled, Error, Result, TtlMinutes};
use tracing::warn;

use crate::domain::{CachedValue, GetOptions};
use crate::expiry::{self, Clock, SystemClock};
use crate::gate::ReadinessGate;
use crate::ports::StoreAdapter;

/// TTL cache layered over a [`StoreAdapter`].
///
/// Each cache key maps to two independent records in the store: the value
/// record at the key itself and an optional expiration record at a derived
/// key. The expiration record exists iff the last `set` supplied a positive
/// TTL; reads check it first and treat an elapsed stamp as a miss.
///
/// Every operation first awaits the one-shot readiness gate. Operations on
/// the same key behave consistently when awaited in sequence; the cache adds
/// no locking across overlapping unawaited calls.
pub struct ExpiringCache {
    store: Arc<dyn StoreAdapter>,
    gate: ReadinessGate,
    clock: Arc<dyn Clock>,
}

impl ExpiringCache {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Builds a cache with an injected time source.
    pub fn with_clock(store: Arc<dyn StoreAdapter>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate: ReadinessGate::new(store.clone()),
            store,
            clock,
        }
    }

    /// Serializes `value` to JSON and stores it under `key`, expiring after
    /// `ttl` if one is given.
    ///
    /// A failing `Serialize` impl fails the call before anything is written.
    /// Use [`ExpiringCache::set_raw`] to store a string verbatim.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Option<TtlMinutes>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.gate.ready().await?;
        let payload =
            serde_json::to_string(value).map_err(|err| Error::Serialization(err.to_string()))?;
        self.write_records(key, &payload, ttl).await
    }

    /// Stores a string verbatim under `key`, expiring after `ttl` if given.
    pub async fn set_raw(&self, key: &str, value: &str, ttl: Option<TtlMinutes>) -> Result<()> {
        self.gate.ready().await?;
        self.write_records(key, value, ttl).await
    }

    async fn write_records(&self, key: &str, payload: &str, ttl: Option<TtlMinutes>) -> Result<()> {
        self.store.write(key, payload).await?;

        match ttl {
            Some(TtlMinutes(minutes)) if minutes > 0 => {
                let stamp = expiry::encode_stamp(self.clock.now_minutes() + minutes);
                if let Err(err) = self.store.write(&expiry::expiration_key(key), &stamp).await {
                    // A value must not stay stored without its intended
                    // expiration: roll the value write back and report the
                    // expiration write's error. The rollback itself is
                    // best-effort.
                    if let Err(rollback) = self.store.delete(key).await {
                        if warnings_enabled() {
                            warn!(key, error = %rollback, "value rollback failed after expiration write failure");
                        }
                    }
                    return Err(err);
                }
            }
            _ => {
                // An earlier set may have left an expiration record behind;
                // clearing it is best-effort.
                if let Err(err) = self.store.delete(&expiry::expiration_key(key)).await {
                    if warnings_enabled() {
                        warn!(key, error = %err, "stale expiration delete failed");
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether `key`'s expiration stamp has elapsed.
    ///
    /// Absent or undecodable stamps read as not expired. Never mutates
    /// state; resolves `false` when the store is unavailable.
    pub async fn is_expired(&self, key: &str) -> Result<bool> {
        if self.gate.ready().await.is_err() {
            return Ok(false);
        }
        self.check_expired(key).await
    }

    async fn check_expired(&self, key: &str) -> Result<bool> {
        let stamp = self.store.read(&expiry::expiration_key(key)).await?;
        Ok(stamp
            .as_deref()
            .and_then(expiry::decode_stamp)
            .is_some_and(|expires_at| self.clock.now_minutes() >= expires_at))
    }

    /// Retrieves the value stored under `key`, or `None` if absent or
    /// expired. Expired entries are cleaned up as a side effect.
    pub async fn get(&self, key: &str) -> Result<Option<CachedValue>> {
        self.get_with(key, GetOptions::default()).await
    }

    /// [`ExpiringCache::get`] with explicit expiration handling.
    pub async fn get_with(&self, key: &str, opts: GetOptions) -> Result<Option<CachedValue>> {
        if self.gate.ready().await.is_err() {
            return Ok(None);
        }

        if self.check_expired(key).await? {
            if opts.skip_remove {
                if !opts.allow_expired {
                    return Ok(None);
                }
                // Fall through to a plain read of the still-present record.
            } else {
                // Read before discarding so the expired value can still be
                // handed back; skip the read when nothing will be returned.
                let salvaged = if opts.allow_expired {
                    self.store.read(key).await?
                } else {
                    None
                };
                self.discard_records(key).await;
                return Ok(salvaged.map(CachedValue::parse));
            }
        }

        let payload = self.store.read(key).await?;
        Ok(payload.map(CachedValue::parse))
    }

    /// Deletes `key`'s value and expiration records.
    ///
    /// Both deletes are attempted in sequence; individual failures are
    /// logged and swallowed.
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.gate.ready().await?;
        self.discard_records(key).await;
        Ok(())
    }

    /// Deletes every record in the cache's namespace.
    pub async fn flush(&self) -> Result<()> {
        self.gate.ready().await?;
        self.store.clear().await
    }

    /// Whether the underlying store initialized successfully. Never fails.
    pub async fn supported(&self) -> bool {
        self.gate.is_ready().await
    }

    // Best-effort removal of both records for a key.
    async fn discard_records(&self, key: &str) {
        for record_key in [key.to_string(), expiry::expiration_key(key)] {
            if let Err(err) = self.store.delete(&record_key).await {
                if warnings_enabled() {
                    warn!(key = %record_key, error = %err, "cleanup delete failed");
                }
            }
        }
    }
}

impl std::fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("store", &"<dyn StoreAdapter>")
            .finish()
    }
}
