//! Persisted form of the whole store.
//!
//! The encoded snapshot carries a `schemaVersion` field. Decoding reads that
//! field first and dispatches to the matching layout, so older blobs keep
//! loading after the layout changes.

use crate::types::trash_item::TrashItem;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

pub(crate) mod v1;

pub use v1::Snapshot;

pub const SCHEMA_VERSION: u32 = v1::VERSION;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version: {0}")]
    UnsupportedVersion(u32),

    #[error("duplicate id {id} in {collection}")]
    DuplicateId { collection: &'static str, id: Uuid },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaHeader {
    schema_version: u32,
}

impl Snapshot {
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, SnapshotError> {
        let header: SchemaHeader = serde_json::from_str(raw)?;
        let snapshot = match header.schema_version {
            v1::VERSION => serde_json::from_str::<v1::Snapshot>(raw)?,
            version => return Err(SnapshotError::UnsupportedVersion(version)),
        };
        snapshot.check_ids()?;
        Ok(snapshot)
    }

    /// Ids must be unique within each collection and within the trash.
    pub fn check_ids(&self) -> Result<(), SnapshotError> {
        let collections = &self.collections;
        unique("technologies", collections.technologies.iter().map(|r| r.id))?;
        unique("projects", collections.projects.iter().map(|r| r.id))?;
        unique("categories", collections.categories.iter().map(|r| r.id))?;
        unique("trash", self.trash.iter().map(TrashItem::id))
    }
}

fn unique(
    collection: &'static str,
    ids: impl Iterator<Item = Uuid>,
) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SnapshotError::DuplicateId { collection, id });
        }
    }
    Ok(())
}
