//! Entity store combining live collections, the trash and persistence.
//!
//! Every mutation is applied in memory first and then written through to the
//! slot backend. A failed write is logged and leaves the store dirty; the next
//! successful write or an explicit [`FolioCore::flush`] catches up.

use crate::core::trash::TrashBin;
use crate::types::{
    Category, Collections, Config, Entity, EntityKind, EntryLabel, MaintenanceMetadata, Project,
    Record, RetentionConfig, SCHEMA_VERSION, Snapshot, SyncState, Technology, TrashItem,
    TrashedEntity,
};
use chrono::{DateTime, TimeDelta, Utc};
use error::FolioError;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub(crate) mod db;
pub(crate) mod persistence;
pub mod sweeper;
pub(crate) mod trash;

pub use db::Database;
pub use db::error::DatabaseError;
pub use persistence::error::PersistError;
pub use persistence::{MemorySlots, Persistence, SlotStorage};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum FolioError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("Persistence error: {0}")]
        Persist(#[from] PersistError),
    }
}

pub struct FolioCore<S: SlotStorage = Database> {
    collections: Collections,
    trash: TrashBin,
    maintenance: MaintenanceMetadata,
    persistence: Persistence<S>,
    retention: RetentionConfig,
    dirty: bool,
}

/// Result of a successful restore.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreOutcome {
    pub kind: EntityKind,
    pub entity_id: Uuid,
}

#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub purged: Vec<TrashItem>,
}

impl FolioCore<Database> {
    /// Opens the redb-backed store under `config.base_path`.
    ///
    /// An unreadable database file is moved aside and the store starts empty.
    pub fn open(config: Config) -> Result<Self, FolioError> {
        let db = Database::open_or_recover(&config.db_path())?;
        let persistence = Persistence::new(db, config.namespace);
        Ok(Self::new(persistence, config.retention))
    }
}

impl FolioCore<MemorySlots> {
    /// A store that lives only as long as the value.
    pub fn in_memory(retention: RetentionConfig) -> Self {
        Self::new(Persistence::new(MemorySlots::new(), "memory"), retention)
    }
}

/// Lifecycle operations.
impl<S: SlotStorage> FolioCore<S> {
    /// Rehydrates from the backend; absent or corrupt data starts empty.
    pub fn new(persistence: Persistence<S>, retention: RetentionConfig) -> Self {
        let snapshot = persistence.load();
        debug!(
            namespace = persistence.namespace(),
            technologies = snapshot.collections.technologies.len(),
            projects = snapshot.collections.projects.len(),
            categories = snapshot.collections.categories.len(),
            trashed = snapshot.trash.len(),
            "Store loaded"
        );
        Self::from_parts(persistence, retention, snapshot, false)
    }

    /// Starts from `seed` instead of the stored snapshot and writes it through.
    ///
    /// A seed with duplicate ids is discarded and the store starts empty.
    pub fn with_seed(
        persistence: Persistence<S>,
        retention: RetentionConfig,
        seed: Snapshot,
    ) -> Self {
        let seed = match seed.check_ids() {
            Ok(()) => seed,
            Err(e) => {
                warn!(namespace = persistence.namespace(), error = %e, "Discarding invalid seed");
                Snapshot::default()
            }
        };
        let mut core = Self::from_parts(persistence, retention, seed, true);
        core.persist();
        core
    }

    fn from_parts(
        persistence: Persistence<S>,
        retention: RetentionConfig,
        snapshot: Snapshot,
        dirty: bool,
    ) -> Self {
        Self {
            collections: snapshot.collections,
            trash: TrashBin::from_items(snapshot.trash),
            maintenance: snapshot.maintenance,
            persistence,
            retention,
            dirty,
        }
    }

    pub fn retention(&self) -> RetentionConfig {
        self.retention
    }

    /// True while the last write to the backend has failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current state in persisted form.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: SCHEMA_VERSION,
            collections: self.collections.clone(),
            trash: self.trash.items().to_vec(),
            maintenance: self.maintenance.clone(),
        }
    }

    /// Writes the current state, surfacing any backend error.
    pub fn flush(&mut self) -> Result<(), FolioError> {
        self.persistence.save(&self.snapshot())?;
        self.dirty = false;
        Ok(())
    }

    /// Flushes and hands back the backend.
    pub fn close(mut self) -> Result<S, FolioError> {
        self.flush()?;
        Ok(self.persistence.into_storage())
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.snapshot()) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!(namespace = self.persistence.namespace(), error = %e, "Failed to persist store");
                self.dirty = true;
            }
        }
    }
}

/// Read operations.
impl<S: SlotStorage> FolioCore<S> {
    pub fn get<T: Entity>(&self, id: Uuid) -> Option<&Record<T>> {
        T::collection(&self.collections).iter().find(|r| r.id == id)
    }

    /// Live records of one kind, in insertion order.
    pub fn list<T: Entity>(&self) -> &[Record<T>] {
        T::collection(&self.collections)
    }

    /// Records whose latest change the backend has not confirmed yet.
    pub fn pending<T: Entity>(&self) -> Vec<&Record<T>> {
        T::collection(&self.collections)
            .iter()
            .filter(|r| r.sync_state == SyncState::Pending)
            .collect()
    }

    pub fn active_labels(&self) -> Vec<EntryLabel> {
        self.collections.labels()
    }

    pub fn trashed_labels(&self) -> Vec<EntryLabel> {
        self.trash.items().iter().map(TrashItem::label).collect()
    }
}

/// Content operations.
impl<S: SlotStorage> FolioCore<S> {
    pub fn add<T: Entity>(&mut self, data: T, now: DateTime<Utc>) -> Record<T> {
        let record = Record::new(data, now);
        T::collection_mut(&mut self.collections).push(record.clone());
        debug!(kind = %T::KIND, id = %record.id, "Entity added");

        self.persist();
        record
    }

    /// Merges `patch` into the record. Returns `None` without mutating if
    /// the id is unknown.
    pub fn update<T: Entity>(
        &mut self,
        id: Uuid,
        patch: T::Patch,
        now: DateTime<Utc>,
    ) -> Option<Record<T>> {
        let record = T::collection_mut(&mut self.collections)
            .iter_mut()
            .find(|r| r.id == id)?;

        record.data.apply(patch);
        record.updated_at = now.max(record.updated_at);
        record.sync_state = SyncState::Pending;
        let updated = record.clone();
        debug!(kind = %T::KIND, %id, "Entity updated");

        self.persist();
        Some(updated)
    }

    /// Records backend acknowledgement of the latest change.
    pub fn mark_synced<T: Entity>(&mut self, id: Uuid) -> bool {
        let Some(record) = T::collection_mut(&mut self.collections)
            .iter_mut()
            .find(|r| r.id == id)
        else {
            return false;
        };

        if record.sync_state != SyncState::Synced {
            record.sync_state = SyncState::Synced;
            self.persist();
        }
        true
    }
}

/// Trash operations.
impl<S: SlotStorage> FolioCore<S> {
    /// Moves the entity into the trash. Returns `None` if the id is unknown.
    pub fn remove<T: Entity>(&mut self, id: Uuid, now: DateTime<Utc>) -> Option<TrashItem> {
        let collection = T::collection_mut(&mut self.collections);
        let pos = collection.iter().position(|r| r.id == id)?;
        let record = collection.remove(pos);

        let item = self
            .trash
            .put(T::into_trashed(record), now, self.retention.retention)
            .clone();
        debug!(kind = %T::KIND, %id, trash_id = %item.id(), "Entity moved to trash");

        self.persist();
        Some(item)
    }

    pub fn list_trash(&self) -> &[TrashItem] {
        self.trash.items()
    }

    pub fn get_trash(&self, trash_id: Uuid) -> Option<&TrashItem> {
        self.trash.get(trash_id)
    }

    /// Re-inserts the trashed entity under its original id.
    ///
    /// Returns `None` if the item is not in the trash, or if an entity with
    /// the same id is live again; in that case the item stays in the trash.
    pub fn restore(&mut self, trash_id: Uuid, now: DateTime<Utc>) -> Option<RestoreOutcome> {
        let item = self.trash.get(trash_id)?;
        let kind = item.kind();
        let entity_id = item.entity().entity_id();

        if self.collections.contains(kind, entity_id) {
            warn!(%kind, %entity_id, %trash_id, "Restore refused, id is already live");
            return None;
        }

        let item = self.trash.take(trash_id)?;
        match item.into_entity() {
            TrashedEntity::Technology(record) => self.reinsert::<Technology>(record, now),
            TrashedEntity::Project(record) => self.reinsert::<Project>(record, now),
            TrashedEntity::Category(record) => self.reinsert::<Category>(record, now),
        }
        debug!(%kind, %entity_id, %trash_id, "Entity restored");

        self.persist();
        Some(RestoreOutcome { kind, entity_id })
    }

    fn reinsert<T: Entity>(&mut self, mut record: Record<T>, now: DateTime<Utc>) {
        record.updated_at = now.max(record.updated_at);
        record.sync_state = SyncState::Pending;
        T::collection_mut(&mut self.collections).push(record);
    }

    /// Drops the item for good. Returns `false` if it was not in the trash.
    pub fn permanently_delete(&mut self, trash_id: Uuid) -> bool {
        let Some(item) = self.trash.take(trash_id) else {
            return false;
        };
        debug!(kind = %item.kind(), %trash_id, "Trash item purged");

        self.persist();
        true
    }

    /// Purges everything in the trash regardless of expiry.
    pub fn empty_trash(&mut self) -> Vec<TrashItem> {
        let purged = self.trash.drain();
        if !purged.is_empty() {
            info!(count = purged.len(), "Trash emptied");
            self.persist();
        }
        purged
    }

    /// Remaining retention, clamped at zero. `None` if not in the trash.
    pub fn time_until_expiry(&self, trash_id: Uuid, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.trash
            .get(trash_id)
            .map(|item| item.time_until_expiry(now))
    }

    /// Uses the configured threshold (one day by default).
    pub fn is_expiring_soon(&self, trash_id: Uuid, now: DateTime<Utc>) -> bool {
        self.is_expiring_within(trash_id, self.retention.expiring_soon, now)
    }

    pub fn is_expiring_within(
        &self,
        trash_id: Uuid,
        threshold: TimeDelta,
        now: DateTime<Utc>,
    ) -> bool {
        self.trash
            .get(trash_id)
            .is_some_and(|item| item.is_expiring_within(threshold, now))
    }
}

/// Maintenance operations.
impl<S: SlotStorage> FolioCore<S> {
    /// Purges every trash item whose expiry is at or before `now`.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> CleanupOutcome {
        let purged = self.trash.sweep(now);
        self.maintenance.last_run_at = Some(now);

        if purged.is_empty() {
            debug!("Cleanup found no expired trash");
        } else {
            info!(count = purged.len(), remaining = self.trash.len(), "Expired trash purged");
        }

        self.persist();
        CleanupOutcome { purged }
    }

    pub fn last_cleanup_at(&self) -> Option<DateTime<Utc>> {
        self.maintenance.last_run_at
    }

    /// Returns true if cleanup should run (never run or interval elapsed).
    pub fn should_run_cleanup(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        match self.maintenance.last_run_at {
            None => true,
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed >= interval)
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests;
