use chrono::Utc;

/// Suffix appended to a cache key to derive its expiration record's key.
/// Must never collide with a legal value key, so it is long and unusual.
pub const EXPIRATION_SUFFIX: &str = "-cacheexpiration";

/// Radix used when encoding expiration stamps as strings.
pub const EXPIRY_RADIX: u32 = 10;

/// Resolution of expiration stamps: one unit per minute.
pub const EXPIRY_UNIT_MS: u64 = 60 * 1000;

/// Returns the store key of the expiration record paired with `key`.
pub fn expiration_key(key: &str) -> String {
    format!("{key}{EXPIRATION_SUFFIX}")
}

/// Encodes a minutes-since-epoch stamp for storage.
pub fn encode_stamp(minutes: u64) -> String {
    // Encoded and decoded with the same EXPIRY_RADIX constant so the two
    // can only change together.
    minutes.to_string()
}

/// Decodes a stored stamp. Undecodable payloads are `None`, which callers
/// treat as "never expires".
pub fn decode_stamp(payload: &str) -> Option<u64> {
    u64::from_str_radix(payload.trim(), EXPIRY_RADIX).ok()
}

/// Source of the current time at stamp resolution.
///
/// The cache takes this as an injected dependency so the expiration window
/// can be driven manually under test instead of sleeping through it.
pub trait Clock: Send + Sync + 'static {
    /// Minutes elapsed since the Unix epoch.
    fn now_minutes(&self) -> u64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_minutes(&self) -> u64 {
        (Utc::now().timestamp_millis() / EXPIRY_UNIT_MS as i64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_key_is_deterministic() {
        assert_eq!(expiration_key("thekey"), "thekey-cacheexpiration");
        assert_eq!(expiration_key("thekey"), expiration_key("thekey"));
    }

    #[test]
    fn test_expiration_key_differs_from_value_key() {
        assert_ne!(expiration_key("thekey"), "thekey");
    }

    #[test]
    fn test_stamp_round_trip() {
        let encoded = encode_stamp(29_567_123);
        assert_eq!(decode_stamp(&encoded), Some(29_567_123));
    }

    #[test]
    fn test_undecodable_stamp_is_none() {
        assert_eq!(decode_stamp("not-a-stamp"), None);
        assert_eq!(decode_stamp(""), None);
    }

    #[test]
    fn test_system_clock_is_minute_resolution() {
        let now = SystemClock.now_minutes();
        let millis = Utc::now().timestamp_millis() as u64;
        // The clock should be within one unit of a direct reading.
        let direct = millis / EXPIRY_UNIT_MS;
        assert!(now.abs_diff(direct) <= 1);
    }
}
