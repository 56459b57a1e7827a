// shared/src/lib.rs

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("clear failed: {0}")]
    ClearFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live expressed in whole minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlMinutes(pub u64);

pub mod config;

// Process-wide diagnostics toggle. Swallowed best-effort failures
// (compensation deletes, expired-entry cleanup) are only logged while set.
static WARNINGS: AtomicBool = AtomicBool::new(false);

/// Enables or disables warning logs for swallowed best-effort failures.
pub fn enable_warnings(enabled: bool) {
    WARNINGS.store(enabled, Ordering::Relaxed);
}

/// Returns whether best-effort failure warnings are currently enabled.
pub fn warnings_enabled() -> bool {
    WARNINGS.load(Ordering::Relaxed)
}
