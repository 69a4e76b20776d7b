use super::{AppConfig, RetentionConfig};
use std::path::PathBuf;

/// Core configuration for FolioCore initialization.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
    /// Slot the snapshot is stored under.
    pub namespace: String,
    pub retention: RetentionConfig,
}

impl Config {
    pub fn from_app(base_path: PathBuf, app: &AppConfig) -> Self {
        let app = app.with_defaults_for_invalid();
        Self {
            base_path,
            namespace: app.storage.namespace.clone(),
            retention: RetentionConfig::from(&app.lifecycle),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("folio.redb")
    }

    pub fn app_config_path(&self) -> PathBuf {
        AppConfig::path(&self.base_path)
    }
}
