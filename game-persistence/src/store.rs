use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex;

/// Failure of the backing store. Fatal to the event being handled; never
/// retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record at {key}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed store with single-key atomicity only: get/set/delete plus an
/// atomic numeric increment. There is no cross-key transaction, so every
/// multi-step read-modify-write sequence must run under the entity's lock
/// (see [`EntityLocks`]).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
    async fn increment(&self, key: &str) -> Result<u64, StoreError>;
}

/// In-process store over a concurrent map. Counters share the keyspace with
/// records, the way INCR-style stores keep them.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        // The entry guard makes the read-add-write atomic per key.
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());
        let next = entry.value().parse::<u64>().unwrap_or(0) + 1;
        *entry.value_mut() = next.to_string();
        Ok(next)
    }
}

/// Per-entity mutual exclusion. The store only guarantees single-key
/// atomicity, so concurrent read-modify-write sequences on the same room or
/// player record would lose updates; holding the entity's lock for the
/// whole sequence closes that race. Lock order is room before player.
/// Entries are never reclaimed; they are bounded by game lifetime, the same
/// accepted leak as rooms themselves.
#[derive(Default)]
pub struct EntityLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_key(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
