use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best-effort key/value store with per-key TTL.
///
/// A miss is `None`, never an error. Write and delete failures are reported as
/// `false` and logged by the implementation; callers never see the cause.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Short label for logs and status output.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. A TTL of zero means no expiry.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> bool;

    async fn del(&self, key: &str) -> bool;

    /// Drop every entry this store owns.
    async fn clear(&self) -> bool;
}

/// Payload the orchestrator keeps under a query fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub result: String,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            stored_at: Utc::now(),
        }
    }

    pub fn encode(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Parse a stored payload. Anything unreadable is treated as a miss.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_stored_at_key() {
        let entry = CacheEntry::new("Calm seas expected");
        let raw = entry.encode().unwrap();
        assert!(raw.contains("\"storedAt\""));
        assert_eq!(CacheEntry::decode(&raw), Some(entry));
    }

    #[test]
    fn garbage_decodes_as_miss() {
        assert_eq!(CacheEntry::decode("not json"), None);
        assert_eq!(CacheEntry::decode("{\"answer\":1}"), None);
    }
}
