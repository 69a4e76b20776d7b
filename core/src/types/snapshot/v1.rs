use crate::types::entity::Collections;
use crate::types::metadata::MaintenanceMetadata;
use crate::types::trash_item::TrashItem;
use serde::{Deserialize, Serialize};

pub const VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub schema_version: u32,
    #[serde(flatten)]
    pub collections: Collections,
    #[serde(default)]
    pub trash: Vec<TrashItem>,
    #[serde(default)]
    pub maintenance: MaintenanceMetadata,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            schema_version: VERSION,
            collections: Collections::default(),
            trash: Vec::new(),
            maintenance: MaintenanceMetadata::default(),
        }
    }
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.trash.is_empty()
    }
}
