use super::{Collections, Entity, EntityKind, Record};
use crate::types::name::Name;
use crate::types::trash_item::TrashedEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: Name,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Category {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<Name>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;
    type Patch = CategoryPatch;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    fn collection(collections: &Collections) -> &Vec<Record<Self>> {
        &collections.categories
    }

    fn collection_mut(collections: &mut Collections) -> &mut Vec<Record<Self>> {
        &mut collections.categories
    }

    fn into_trashed(record: Record<Self>) -> TrashedEntity {
        TrashedEntity::Category(record)
    }
}

fn default_true() -> bool {
    true
}
