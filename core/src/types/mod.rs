pub(crate) mod config;
pub use config::{
    AppConfig, AppConfigError, Config, GeneralConfig, LifecycleConfig, RetentionConfig,
    StorageConfig, Theme,
};

pub(crate) mod name;
pub use name::{MAX_NAME_LENGTH, Name, NameError};

pub(crate) mod entity;
pub use entity::{
    Category, CategoryPatch, Collections, Entity, EntityKind, EntryLabel, Project, ProjectPatch,
    Record, SyncState, Technology, TechnologyPatch,
};

pub(crate) mod trash_item;
pub use trash_item::{TrashItem, TrashedEntity};

pub(crate) mod snapshot;
pub use snapshot::{SCHEMA_VERSION, Snapshot, SnapshotError};

pub(crate) mod metadata;
pub use metadata::MaintenanceMetadata;

pub mod api;
