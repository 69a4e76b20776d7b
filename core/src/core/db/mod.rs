//! Durable slot storage backed by redb.
//!
//! A single table maps slot names to JSON documents. The store writes its
//! whole snapshot into one slot per namespace.

use crate::core::db::error::DatabaseError;
use redb::{ReadableDatabase, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

/// Slot table: slot name → JSON string
const SLOTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("slots");

/// The slot database wrapping redb.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Creates or opens the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = redb::Database::create(path)?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SLOTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Like [`Database::open`], but a file redb cannot read is moved to
    /// [`Database::quarantine_path`] and a fresh database is created.
    pub fn open_or_recover(path: &Path) -> Result<Self, DatabaseError> {
        match Self::open(path) {
            Err(DatabaseError::Redb(redb::DatabaseError::Storage(e))) if path.exists() => {
                let aside = Self::quarantine_path(path);
                warn!(
                    path = %path.display(),
                    aside = %aside.display(),
                    error = %e,
                    "Unreadable database moved aside, starting empty"
                );
                std::fs::rename(path, &aside)?;
                Self::open(path)
            }
            other => other,
        }
    }

    /// Where an unreadable database file is kept for inspection.
    pub fn quarantine_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }
}

/// Slot operations.
impl Database {
    pub fn read_slot(&self, slot: &str) -> Result<Option<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SLOTS_TABLE)?;

        Ok(table.get(slot)?.map(|guard| guard.value().to_string()))
    }

    pub fn write_slot(&mut self, slot: &str, contents: &str) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            table.insert(slot, contents)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Returns `true` if the slot was present.
    pub fn clear_slot(&mut self, slot: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            table.remove(slot)?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
