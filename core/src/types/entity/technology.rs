use super::{Collections, Entity, EntityKind, Record};
use crate::types::name::Name;
use crate::types::trash_item::TrashedEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub name: Name,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Technology {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            category_id: None,
            icon: None,
            is_active: true,
        }
    }
}

/// `Some(None)` clears an optional attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechnologyPatch {
    pub name: Option<Name>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<Uuid>>,
    pub icon: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Entity for Technology {
    const KIND: EntityKind = EntityKind::Technology;
    type Patch = TechnologyPatch;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn apply(&mut self, patch: TechnologyPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    fn collection(collections: &Collections) -> &Vec<Record<Self>> {
        &collections.technologies
    }

    fn collection_mut(collections: &mut Collections) -> &mut Vec<Record<Self>> {
        &mut collections.technologies
    }

    fn into_trashed(record: Record<Self>) -> TrashedEntity {
        TrashedEntity::Technology(record)
    }
}

fn default_true() -> bool {
    true
}
