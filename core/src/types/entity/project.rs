use super::{Collections, Entity, EntityKind, Record};
use crate::types::name::Name;
use crate::types::trash_item::TrashedEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: Name,
    #[serde(default)]
    pub description: Option<String>,
    /// Technologies the project is built with, in display order.
    #[serde(default)]
    pub technology_ids: Vec<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl Project {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            technology_ids: Vec::new(),
            category_id: None,
            github_url: None,
            live_url: None,
            image_url: None,
            is_active: true,
            is_featured: false,
        }
    }
}

/// `Some(None)` clears an optional attribute; `technology_ids` replaces the
/// whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<Name>,
    pub description: Option<Option<String>>,
    pub technology_ids: Option<Vec<Uuid>>,
    pub category_id: Option<Option<Uuid>>,
    pub github_url: Option<Option<String>>,
    pub live_url: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;
    type Patch = ProjectPatch;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn apply(&mut self, patch: ProjectPatch) {
        let ProjectPatch {
            name,
            description,
            technology_ids,
            category_id,
            github_url,
            live_url,
            image_url,
            is_active,
            is_featured,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(technology_ids) = technology_ids {
            self.technology_ids = technology_ids;
        }
        if let Some(category_id) = category_id {
            self.category_id = category_id;
        }
        if let Some(github_url) = github_url {
            self.github_url = github_url;
        }
        if let Some(live_url) = live_url {
            self.live_url = live_url;
        }
        if let Some(image_url) = image_url {
            self.image_url = image_url;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = is_featured {
            self.is_featured = is_featured;
        }
    }

    fn collection(collections: &Collections) -> &Vec<Record<Self>> {
        &collections.projects
    }

    fn collection_mut(collections: &mut Collections) -> &mut Vec<Record<Self>> {
        &mut collections.projects
    }

    fn into_trashed(record: Record<Self>) -> TrashedEntity {
        TrashedEntity::Project(record)
    }
}

fn default_true() -> bool {
    true
}
