//! Tracked message storage - byte-level API keyed by platform message id.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::sync::Arc;

pub const TRACKED_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("tracked_messages");

/// Low-level tracked message storage with byte-level API
pub struct TrackedMessageStorage {
    db: Arc<Database>,
}

impl TrackedMessageStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(TRACKED_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store raw record data, overwriting any previous entry.
    pub fn put_raw(&self, message_id: u64, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TRACKED_TABLE)?;
            table.insert(message_id, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get raw record data by message id
    pub fn get_raw(&self, message_id: u64) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRACKED_TABLE)?;

        if let Some(value) = table.get(message_id)? {
            Ok(Some(value.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    /// List all entries as (message_id, data) pairs.
    pub fn list_raw(&self) -> Result<Vec<(u64, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRACKED_TABLE)?;

        let mut records = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            records.push((key.value(), value.value().to_vec()));
        }

        Ok(records)
    }

    /// Delete by message id, returns true if a record existed.
    pub fn delete(&self, message_id: u64) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(TRACKED_TABLE)?;
            let existed = table.remove(message_id)?.is_some();
            existed
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Count all tracked records.
    pub fn count(&self) -> Result<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRACKED_TABLE)?;
        Ok(table.len()? as usize)
    }
}
