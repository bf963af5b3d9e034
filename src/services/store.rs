use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur with key-value store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal string key-value storage that drafts and sessions are kept in.
///
/// Single-key overwrite semantics; no transactions. Implementations must be
/// shareable across request handlers.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON value
pub fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn set_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    store.set(key, json)
}

/// Process-local store backed by a bounded concurrent cache.
///
/// Every key the service writes is fixed per domain and namespace, so the
/// store never holds more than a few dozen entries. Capacities below
/// [`MemoryStore::MIN_CAPACITY`] are raised to it, which keeps eviction from
/// ever dropping the account list or a draft.
pub struct MemoryStore {
    entries: moka::sync::Cache<String, String>,
}

impl MemoryStore {
    /// Two draft keys per domain plus two session keys per namespace, with headroom
    pub const MIN_CAPACITY: u64 = 64;

    pub fn new(capacity: u64) -> Self {
        if capacity < Self::MIN_CAPACITY {
            tracing::warn!(
                "Store capacity {} is below the minimum, using {}",
                capacity,
                Self::MIN_CAPACITY
            );
        }
        let capacity = capacity.max(Self::MIN_CAPACITY);
        Self {
            entries: moka::sync::Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.entries.get(key);
        tracing::trace!("store get {}: {}", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        tracing::trace!("store set: {}", key);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.invalidate(key);
        tracing::trace!("store delete: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_delete() {
        let store = MemoryStore::new(100);

        store.set("key", "value".to_string()).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.set("key", "other".to_string()).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("other"));

        store.delete("key").unwrap();
        assert!(store.get("key").unwrap().is_none());

        // deleting a missing key is fine
        store.delete("key").unwrap();
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::default();
        set_json(&store, "numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<u32>> = get_json(&store, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u32>> = get_json(&store, "nothing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let store = MemoryStore::default();
        store.set("broken", "{not json".to_string()).unwrap();

        let result: Result<Option<Vec<u32>>, _> = get_json(&store, "broken");
        assert!(matches!(result, Err(StoreError::SerializationError(_))));
    }

    #[test]
    fn test_small_capacity_keeps_every_service_key() {
        use crate::core::DomainKind;

        let store = MemoryStore::new(1);
        let mut keys = vec!["ami_users_v1".to_string(), "ami_current_user_v1".to_string()];
        for kind in DomainKind::ALL {
            keys.push(kind.draft_key());
            keys.push(kind.submission_key());
        }

        for key in &keys {
            store.set(key, "{}".to_string()).unwrap();
        }
        // Rewrite drafts repeatedly the way autosave does
        for _ in 0..50 {
            for kind in DomainKind::ALL {
                store.set(&kind.draft_key(), "{}".to_string()).unwrap();
            }
        }

        assert_eq!(store.entry_count(), keys.len() as u64);
        for key in &keys {
            assert!(store.get(key).unwrap().is_some(), "{} was evicted", key);
        }
    }
}
