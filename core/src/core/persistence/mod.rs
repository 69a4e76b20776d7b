//! Persistence adapter: moves whole-store snapshots in and out of a slot.
//!
//! Loading never fails. Missing or unreadable data degrades to an empty
//! snapshot and a warning, so the store always starts.

use crate::core::db::Database;
use crate::core::db::error::DatabaseError;
use crate::types::{Snapshot, SnapshotError};
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::{debug, warn};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum PersistError {
        #[error("Snapshot error: {0}")]
        Snapshot(#[from] SnapshotError),

        #[error("Slot storage error: {0}")]
        Storage(Box<dyn std::error::Error + Send + Sync>),
    }
}

use error::PersistError;

/// A durable string-keyed slot store.
pub trait SlotStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    fn read(&self, slot: &str) -> Result<Option<String>, Self::Error>;

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), Self::Error>;

    fn clear(&mut self, slot: &str) -> Result<(), Self::Error>;
}

impl SlotStorage for Database {
    type Error = DatabaseError;

    fn read(&self, slot: &str) -> Result<Option<String>, DatabaseError> {
        self.read_slot(slot)
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), DatabaseError> {
        self.write_slot(slot, contents)
    }

    fn clear(&mut self, slot: &str) -> Result<(), DatabaseError> {
        self.clear_slot(slot).map(|_| ())
    }
}

/// In-process slots; contents vanish with the value.
#[derive(Debug, Default, Clone)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(slot: &str, contents: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), contents.to_string());
        Self { slots }
    }
}

impl SlotStorage for MemorySlots {
    type Error = Infallible;

    fn read(&self, slot: &str) -> Result<Option<String>, Infallible> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), Infallible> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    fn clear(&mut self, slot: &str) -> Result<(), Infallible> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Binds a slot backend to the namespace the store lives under.
pub struct Persistence<S> {
    storage: S,
    namespace: String,
}

impl<S: SlotStorage> Persistence<S> {
    pub fn new(storage: S, namespace: impl Into<String>) -> Self {
        Self {
            storage,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the stored snapshot, or an empty one if absent or corrupt.
    pub fn load(&self) -> Snapshot {
        let raw = match self.storage.read(&self.namespace) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(namespace = %self.namespace, "No stored snapshot, starting empty");
                return Snapshot::default();
            }
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "Failed to read snapshot, starting empty");
                return Snapshot::default();
            }
        };

        match Snapshot::decode(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "Discarding unreadable snapshot");
                Snapshot::default()
            }
        }
    }

    pub fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let encoded = snapshot.encode()?;
        self.storage
            .write(&self.namespace, &encoded)
            .map_err(|e| PersistError::Storage(Box::new(e)))
    }

    /// Removes the stored snapshot entirely.
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.storage
            .clear(&self.namespace)
            .map_err(|e| PersistError::Storage(Box::new(e)))
    }
}
