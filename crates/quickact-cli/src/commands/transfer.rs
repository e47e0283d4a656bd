//! `export` and `import` bridge the redb store and the legacy JSON handler
//! file, so deployments can migrate in either direction.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use quickact_core::store::{JsonFileStore, RecordStore};

use super::Db;

pub fn export(db: &Db, path: &Path) -> Result<()> {
    let records = db.records.load_all()?;
    let file = JsonFileStore::new(path);
    for record in &records {
        file.put(record)?;
    }
    println!(
        "{}",
        format!("Exported {} tracked messages to {}.", records.len(), path.display()).green()
    );
    Ok(())
}

pub fn import(db: &Db, path: &Path) -> Result<()> {
    let file = JsonFileStore::new(path);
    let records = file.load_all()?;
    for record in &records {
        db.records.put(record)?;
    }
    println!(
        "{}",
        format!(
            "Imported {} tracked messages from {}.",
            records.len(),
            path.display()
        )
        .green()
    );
    Ok(())
}
