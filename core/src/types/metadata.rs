//! Bookkeeping persisted next to the collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When the expiry sweep last ran; `None` until the first sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceMetadata {
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}
