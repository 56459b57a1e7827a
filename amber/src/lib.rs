//! TTL key-value cache layered over an asynchronous record store.
//!
//! The cache keeps two records per key in the underlying store: the value
//! itself and an optional expiration stamp under a derived key. Reads check
//! the stamp first and clean up elapsed entries. Storage backends plug in
//! through the [`ports::StoreAdapter`] trait; reference adapters live in the
//! `storage-engine` crate.

pub mod cache;
pub mod domain;
pub mod expiry;
pub mod gate;
pub mod ports;

pub use cache::ExpiringCache;
pub use domain::{CachedValue, GetOptions};
pub use ports::StoreAdapter;
