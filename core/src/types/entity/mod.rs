//! Entity payloads and the record envelope every live entity is stored in.

use crate::types::trash_item::TrashedEntity;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

mod category;
mod project;
mod technology;

pub use category::{Category, CategoryPatch};
pub use project::{Project, ProjectPatch};
pub use technology::{Technology, TechnologyPatch};

/// Discriminator naming which live collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Technology,
    Project,
    Category,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Technology => write!(f, "technology"),
            EntityKind::Project => write!(f, "project"),
            EntityKind::Category => write!(f, "category"),
        }
    }
}

/// Whether the backend has acknowledged the latest local change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    #[default]
    Pending,
    Synced,
}

/// A live entity: payload plus identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub sync_state: SyncState,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Entity> Record<T> {
    pub(crate) fn new(data: T, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            sync_state: SyncState::Pending,
            data,
        }
    }

    pub fn label(&self) -> EntryLabel {
        EntryLabel {
            kind: T::KIND,
            id: self.id,
            text: self.data.name().to_string(),
        }
    }
}

/// Live collections, one per entity kind, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub technologies: Vec<Record<Technology>>,
    #[serde(default)]
    pub projects: Vec<Record<Project>>,
    #[serde(default)]
    pub categories: Vec<Record<Category>>,
}

impl Collections {
    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty() && self.projects.is_empty() && self.categories.is_empty()
    }

    pub(crate) fn contains(&self, kind: EntityKind, id: Uuid) -> bool {
        match kind {
            EntityKind::Technology => self.technologies.iter().any(|r| r.id == id),
            EntityKind::Project => self.projects.iter().any(|r| r.id == id),
            EntityKind::Category => self.categories.iter().any(|r| r.id == id),
        }
    }

    pub(crate) fn labels(&self) -> Vec<EntryLabel> {
        self.technologies
            .iter()
            .map(Record::label)
            .chain(self.projects.iter().map(Record::label))
            .chain(self.categories.iter().map(Record::label))
            .collect()
    }
}

/// Implemented by every entity payload the store manages.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Sized {
    const KIND: EntityKind;

    /// Partial update; unset fields leave the payload untouched.
    type Patch: Default;

    fn name(&self) -> &str;

    fn apply(&mut self, patch: Self::Patch);

    fn collection(collections: &Collections) -> &Vec<Record<Self>>;

    fn collection_mut(collections: &mut Collections) -> &mut Vec<Record<Self>>;

    fn into_trashed(record: Record<Self>) -> TrashedEntity;
}

/// Searchable handle for a live entity or a trash item.
///
/// For live entries `id` is the entity id, for trash entries it is the
/// trash item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryLabel {
    pub kind: EntityKind,
    pub id: Uuid,
    pub text: String,
}
