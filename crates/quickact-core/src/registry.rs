//! Tracked message registry.
//!
//! In-memory index of armed messages, hydrated from the store at startup and
//! persisted on every mutation. A message id maps to at most one record;
//! re-registering overwrites (re-arming a message is allowed).
//!
//! There is deliberately no per-record dispatch lock: concurrent handlers
//! for the same message can both observe the record as present. Dispatch is
//! at-least-once, matching the original deployment behavior.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::record::TrackedMessage;
use crate::store::RecordStore;

pub struct Registry {
    records: RwLock<HashMap<u64, TrackedMessage>>,
    store: Arc<dyn RecordStore>,
}

impl Registry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Hydrate the in-memory index from the store. Called once at startup.
    pub async fn load(&self) -> anyhow::Result<usize> {
        let records = self.store.load_all()?;
        let count = records.len();

        let mut map = self.records.write().await;
        map.clear();
        for record in records {
            map.insert(record.message_id, record);
        }

        info!("Loaded {} tracked messages", count);
        Ok(count)
    }

    /// Insert or overwrite a record and persist it.
    ///
    /// A store failure is logged, not returned: the in-memory state stays
    /// authoritative and diverges from disk until the next successful write.
    pub async fn register(&self, record: TrackedMessage) {
        let message_id = record.message_id;
        let action_type = record.action_type;

        self.records.write().await.insert(message_id, record.clone());

        if let Err(e) = self.store.put(&record) {
            error!(message_id, "Failed to persist tracked message: {e:#}");
        }
        info!(message_id, action_type = %action_type, "Registered message for reaction handling");
    }

    /// Remove a record if present, returning whether one existed.
    ///
    /// Idempotent: a second call for the same id returns false.
    pub async fn unregister(&self, message_id: u64) -> bool {
        let existed = self.records.write().await.remove(&message_id).is_some();

        if existed {
            if let Err(e) = self.store.delete(message_id) {
                error!(message_id, "Failed to delete tracked message from store: {e:#}");
            }
            info!(message_id, "Unregistered message from reaction handling");
        } else {
            debug!(message_id, "Message not found in registry");
        }

        existed
    }

    pub async fn lookup(&self, message_id: u64) -> Option<TrackedMessage> {
        self.records.read().await.get(&message_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
