//! QuickAct Storage - Low-level storage abstraction layer
//!
//! This crate provides the persistence layer for QuickAct, using redb as the
//! embedded database. It exposes byte-level APIs so the engine crate can own
//! the record types without circular dependencies.
//!
//! # Tables
//!
//! - `tracked_messages` - Armed messages, keyed by platform message id
//! - `action_overrides` - Deployment emoji-to-action overrides, keyed by emoji

pub mod overrides;
pub mod tracked;

use anyhow::Result;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

pub use overrides::ActionOverrideStorage;
pub use tracked::TrackedMessageStorage;

/// Central storage manager that initializes all storage subsystems
pub struct Storage {
    db: Arc<Database>,
    pub tracked: TrackedMessageStorage,
    pub overrides: ActionOverrideStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and initialize
    /// all required tables.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = Arc::new(Database::create(&path)?);
        tracing::debug!("Opened database at {}", path.as_ref().display());

        Ok(Self {
            tracked: TrackedMessageStorage::new(db.clone())?,
            overrides: ActionOverrideStorage::new(db.clone())?,
            db,
        })
    }

    /// Access the underlying database handle.
    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }
}
