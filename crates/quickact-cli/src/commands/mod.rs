pub mod actions;
pub mod tracked;
pub mod transfer;

use anyhow::Result;
use std::path::Path;

use quickact_core::store::RedbRecordStore;
use quickact_storage::{ActionOverrideStorage, Storage};

/// Open handles to both tables of the database.
pub struct Db {
    pub records: RedbRecordStore,
    pub overrides: ActionOverrideStorage,
}

pub fn open(db_path: &Path) -> Result<Db> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let storage = Storage::new(db_path)?;
    Ok(Db {
        records: RedbRecordStore::new(storage.tracked),
        overrides: storage.overrides,
    })
}
