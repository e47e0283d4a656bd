//! Action override storage - emoji to action-name overrides, keyed by emoji.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

pub const OVERRIDE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("action_overrides");

/// Deployment-supplied emoji-to-action overrides.
///
/// Values are action names as plain strings; the engine crate decides whether
/// a name maps to a known action.
pub struct ActionOverrideStorage {
    db: Arc<Database>,
}

impl ActionOverrideStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(OVERRIDE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Set the action name for an emoji, overwriting any previous mapping.
    pub fn set(&self, emoji: &str, action: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(OVERRIDE_TABLE)?;
            table.insert(emoji, action)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get the override for an emoji, if any.
    pub fn get(&self, emoji: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OVERRIDE_TABLE)?;

        if let Some(value) = table.get(emoji)? {
            Ok(Some(value.value().to_string()))
        } else {
            Ok(None)
        }
    }

    /// List all overrides as (emoji, action) pairs.
    pub fn list_raw(&self) -> Result<Vec<(String, String)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OVERRIDE_TABLE)?;

        let mut overrides = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            overrides.push((key.value().to_string(), value.value().to_string()));
        }

        Ok(overrides)
    }

    /// Remove the override for an emoji, returns true if one existed.
    pub fn unset(&self, emoji: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(OVERRIDE_TABLE)?;
            let existed = table.remove(emoji)?.is_some();
            existed
        };
        write_txn.commit()?;
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_unset() {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("test.db")).unwrap());
        let storage = ActionOverrideStorage::new(db).unwrap();

        storage.set("🚀", "create_ticket").unwrap();
        assert_eq!(storage.get("🚀").unwrap().as_deref(), Some("create_ticket"));

        storage.set("🚀", "pin_message").unwrap();
        assert_eq!(storage.get("🚀").unwrap().as_deref(), Some("pin_message"));

        assert!(storage.unset("🚀").unwrap());
        assert!(!storage.unset("🚀").unwrap());
        assert!(storage.get("🚀").unwrap().is_none());
    }

    #[test]
    fn test_list_raw() {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("test.db")).unwrap());
        let storage = ActionOverrideStorage::new(db).unwrap();

        storage.set("🎫", "create_ticket").unwrap();
        storage.set("📌", "pin_message").unwrap();

        let overrides = storage.list_raw().unwrap();
        assert_eq!(overrides.len(), 2);
    }
}
