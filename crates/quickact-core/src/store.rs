//! Record persistence.
//!
//! The registry talks to a [`RecordStore`] so the backing medium is
//! swappable: the redb database for normal deployments, the legacy
//! whole-file JSON format for import/export and small installs, and a plain
//! in-memory map for embedders and tests.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::record::TrackedMessage;

/// Key-value persistence for tracked message records.
///
/// Writes are synchronous; callers run them inside an event-loop turn, so
/// implementations should keep individual operations small.
pub trait RecordStore: Send + Sync {
    /// Insert or overwrite the record under its message id.
    fn put(&self, record: &TrackedMessage) -> Result<()>;

    /// Fetch a record by message id.
    fn get(&self, message_id: u64) -> Result<Option<TrackedMessage>>;

    /// Remove a record, returning whether one existed.
    fn delete(&self, message_id: u64) -> Result<bool>;

    /// Load every persisted record.
    fn load_all(&self) -> Result<Vec<TrackedMessage>>;
}

// ── In-memory store ──────────────────────────────────────────────────

/// Volatile store backed by a plain map.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<u64, TrackedMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn put(&self, record: &TrackedMessage) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.message_id, record.clone());
        Ok(())
    }

    fn get(&self, message_id: u64) -> Result<Option<TrackedMessage>> {
        Ok(self.records.lock().unwrap().get(&message_id).cloned())
    }

    fn delete(&self, message_id: u64) -> Result<bool> {
        Ok(self.records.lock().unwrap().remove(&message_id).is_some())
    }

    fn load_all(&self) -> Result<Vec<TrackedMessage>> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

// ── redb store ───────────────────────────────────────────────────────

/// Typed wrapper over the byte-level redb table.
pub struct RedbRecordStore {
    inner: quickact_storage::TrackedMessageStorage,
}

impl RedbRecordStore {
    pub fn new(inner: quickact_storage::TrackedMessageStorage) -> Self {
        Self { inner }
    }
}

impl RecordStore for RedbRecordStore {
    fn put(&self, record: &TrackedMessage) -> Result<()> {
        let data = serde_json::to_vec(record)?;
        self.inner.put_raw(record.message_id, &data)
    }

    fn get(&self, message_id: u64) -> Result<Option<TrackedMessage>> {
        match self.inner.get_raw(message_id)? {
            Some(data) => {
                let mut record: TrackedMessage = serde_json::from_slice(&data)
                    .with_context(|| format!("corrupt record {}", message_id))?;
                record.message_id = message_id;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, message_id: u64) -> Result<bool> {
        self.inner.delete(message_id)
    }

    fn load_all(&self) -> Result<Vec<TrackedMessage>> {
        let mut records = Vec::new();
        for (message_id, data) in self.inner.list_raw()? {
            let mut record: TrackedMessage = serde_json::from_slice(&data)
                .with_context(|| format!("corrupt record {}", message_id))?;
            record.message_id = message_id;
            records.push(record);
        }
        Ok(records)
    }
}

// ── Legacy JSON file store ───────────────────────────────────────────

/// Whole-file JSON store in the legacy deployment format: one object keyed
/// by stringified message id.
///
/// Every mutation rewrites the full table, which is how the original bot
/// persisted its handlers. Kept for import/export and small installs.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_table(&self) -> Result<HashMap<u64, TrackedMessage>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let raw: HashMap<String, TrackedMessage> =
            serde_json::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))?;

        let mut table = HashMap::with_capacity(raw.len());
        for (key, mut record) in raw {
            let message_id: u64 = key
                .parse()
                .with_context(|| format!("non-numeric message id key {:?}", key))?;
            record.message_id = message_id;
            table.insert(message_id, record);
        }
        Ok(table)
    }

    fn write_table(&self, table: &HashMap<u64, TrackedMessage>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw: HashMap<String, &TrackedMessage> = table
            .iter()
            .map(|(id, record)| (id.to_string(), record))
            .collect();
        let content = serde_json::to_string_pretty(&raw)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl RecordStore for JsonFileStore {
    fn put(&self, record: &TrackedMessage) -> Result<()> {
        let mut table = self.read_table()?;
        table.insert(record.message_id, record.clone());
        self.write_table(&table)
    }

    fn get(&self, message_id: u64) -> Result<Option<TrackedMessage>> {
        Ok(self.read_table()?.remove(&message_id))
    }

    fn delete(&self, message_id: u64) -> Result<bool> {
        let mut table = self.read_table()?;
        let existed = table.remove(&message_id).is_some();
        if existed {
            self.write_table(&table)?;
        }
        Ok(existed)
    }

    fn load_all(&self) -> Result<Vec<TrackedMessage>> {
        Ok(self.read_table()?.into_values().collect())
    }
}

// ── Legacy override file ─────────────────────────────────────────────

/// Read an emoji-to-action override file in the legacy flat JSON shape.
pub fn read_override_file(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: HashMap<String, String> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(raw.into_iter().collect())
}

/// Write an emoji-to-action override file in the legacy flat JSON shape.
pub fn write_override_file(path: &Path, overrides: &[(String, String)]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw: HashMap<&str, &str> = overrides
        .iter()
        .map(|(emoji, action)| (emoji.as_str(), action.as_str()))
        .collect();
    let content = serde_json::to_string_pretty(&raw)?;
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
