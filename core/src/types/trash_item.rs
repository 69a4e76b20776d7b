//! Snapshot of a deleted entity held in the trash until restore or expiry.

use crate::types::entity::{Category, EntityKind, EntryLabel, Project, Record, Technology};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The deleted entity, tagged with the collection it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum TrashedEntity {
    Technology(Record<Technology>),
    Project(Record<Project>),
    Category(Record<Category>),
}

impl TrashedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            TrashedEntity::Technology(_) => EntityKind::Technology,
            TrashedEntity::Project(_) => EntityKind::Project,
            TrashedEntity::Category(_) => EntityKind::Category,
        }
    }

    /// Id of the entity before it was deleted.
    pub fn entity_id(&self) -> Uuid {
        match self {
            TrashedEntity::Technology(record) => record.id,
            TrashedEntity::Project(record) => record.id,
            TrashedEntity::Category(record) => record.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TrashedEntity::Technology(record) => record.data.name.as_str(),
            TrashedEntity::Project(record) => record.data.name.as_str(),
            TrashedEntity::Category(record) => record.data.name.as_str(),
        }
    }
}

/// Immutable once created; leaves the trash by restore, manual purge or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashItem {
    id: Uuid,
    entity: TrashedEntity,
    deleted_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TrashItem {
    pub(crate) fn new(entity: TrashedEntity, deleted_at: DateTime<Utc>, retention: TimeDelta) -> Self {
        let expires_at = deleted_at
            .checked_add_signed(retention)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            id: Uuid::new_v4(),
            entity,
            deleted_at,
            expires_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    pub fn entity(&self) -> &TrashedEntity {
        &self.entity
    }

    pub fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired items are eligible for the next sweep.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Remaining retention, clamped at zero.
    pub fn time_until_expiry(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.expires_at - now).max(TimeDelta::zero())
    }

    /// True when at most `threshold` is left, including already expired items.
    pub fn is_expiring_within(&self, threshold: TimeDelta, now: DateTime<Utc>) -> bool {
        self.expires_at - now <= threshold
    }

    pub fn label(&self) -> EntryLabel {
        EntryLabel {
            kind: self.kind(),
            id: self.id,
            text: self.entity.name().to_string(),
        }
    }

    pub(crate) fn into_entity(self) -> TrashedEntity {
        self.entity
    }
}
