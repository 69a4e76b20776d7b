use super::LifecycleConfig;
use chrono::TimeDelta;
use std::time::Duration;

/// Trash timing passed to the store and the sweeper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetentionConfig {
    /// How long a trash item stays restorable.
    pub retention: TimeDelta,
    /// Remaining time below which an item counts as expiring soon.
    pub expiring_soon: TimeDelta,
    pub cleanup_interval: Duration,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self::from(&LifecycleConfig::default())
    }
}

impl From<&LifecycleConfig> for RetentionConfig {
    fn from(config: &LifecycleConfig) -> Self {
        Self {
            retention: TimeDelta::days(config.retention_days as i64),
            expiring_soon: TimeDelta::days(config.expiring_soon_days as i64),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_minutes as u64 * 60),
        }
    }
}
