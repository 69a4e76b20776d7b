use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> std::path::PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.lifecycle.retention_days == 0 {
            errors.push("retention_days must be at least 1".to_string());
        }

        if self.lifecycle.expiring_soon_days > self.lifecycle.retention_days {
            errors.push("expiring_soon_days must not exceed retention_days".to_string());
        }

        if self.lifecycle.cleanup_interval_minutes == 0 {
            errors.push("cleanup_interval_minutes must be at least 1".to_string());
        }

        if self.storage.namespace.trim().is_empty() {
            errors.push("storage namespace must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();

        let retention_days = if self.lifecycle.retention_days == 0 {
            defaults.lifecycle.retention_days
        } else {
            self.lifecycle.retention_days
        };

        Self {
            general: self.general.clone(),
            lifecycle: LifecycleConfig {
                retention_days,
                expiring_soon_days: if self.lifecycle.expiring_soon_days > retention_days {
                    defaults.lifecycle.expiring_soon_days.min(retention_days)
                } else {
                    self.lifecycle.expiring_soon_days
                },
                cleanup_interval_minutes: if self.lifecycle.cleanup_interval_minutes == 0 {
                    defaults.lifecycle.cleanup_interval_minutes
                } else {
                    self.lifecycle.cleanup_interval_minutes
                },
            },
            storage: StorageConfig {
                namespace: if self.storage.namespace.trim().is_empty() {
                    defaults.storage.namespace
                } else {
                    self.storage.namespace.clone()
                },
            },
        }
    }
}

/// General application settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub theme: Theme,
}

/// Theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
            Theme::System => write!(f, "system"),
        }
    }
}

/// Trash retention settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: u32,
    #[serde(default = "default_cleanup_interval_minutes")]
    pub cleanup_interval_minutes: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            expiring_soon_days: default_expiring_soon_days(),
            cleanup_interval_minutes: default_cleanup_interval_minutes(),
        }
    }
}

fn default_retention_days() -> u32 {
    7
}

fn default_expiring_soon_days() -> u32 {
    1
}

fn default_cleanup_interval_minutes() -> u32 {
    60
}

/// Where the store snapshot lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    "portfolio-store".to_string()
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
