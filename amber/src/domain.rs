use serde_json::Value;

/// A value read back from the cache.
///
/// Payloads that parse as JSON come back structured; anything else is the
/// stored string unchanged. A raw string that happens to be valid JSON
/// (e.g. `"5"`) parses as JSON, same as the source behavior of trying
/// to parse every stored payload.
#[derive(Clone, Debug, PartialEq)]
pub enum CachedValue {
    Json(Value),
    Raw(String),
}

impl CachedValue {
    /// Parses a stored payload, falling back to the raw string when it is
    /// not valid JSON.
    pub fn parse(payload: String) -> Self {
        match serde_json::from_str(&payload) {
            Ok(value) => CachedValue::Json(value),
            Err(_) => CachedValue::Raw(payload),
        }
    }

    /// Returns the string content when the value is a raw or JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CachedValue::Raw(s) => Some(s),
            CachedValue::Json(Value::String(s)) => Some(s),
            CachedValue::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            CachedValue::Json(value) => Some(value),
            CachedValue::Raw(_) => None,
        }
    }
}

/// Options for [`crate::cache::ExpiringCache::get_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GetOptions {
    /// Leave both records in place when the key turns out to be expired.
    pub skip_remove: bool,
    /// Return the stored value even when the key is expired.
    pub allow_expired: bool,
}

impl GetOptions {
    pub fn skip_remove(mut self) -> Self {
        self.skip_remove = true;
        self
    }

    pub fn allow_expired(mut self) -> Self {
        self.allow_expired = true;
        self
    }
}
