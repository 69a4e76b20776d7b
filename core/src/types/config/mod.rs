mod app;
mod base;
mod retention;

pub use app::{
    AppConfig, AppConfigError, GeneralConfig, LifecycleConfig, StorageConfig, Theme,
};
pub use base::Config;
pub use retention::RetentionConfig;
