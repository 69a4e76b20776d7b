//! Holding area for deleted entities.
//!
//! Items are kept in deletion order. Removal triggers (restore, manual purge,
//! expiry sweep) all go through `take`/`sweep`, so each is a no-op for ids
//! that are already gone and the triggers commute.

use crate::types::{TrashItem, TrashedEntity};
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

#[derive(Debug, Default)]
pub(crate) struct TrashBin {
    items: Vec<TrashItem>,
}

impl TrashBin {
    pub(crate) fn from_items(items: Vec<TrashItem>) -> Self {
        Self { items }
    }

    pub(crate) fn items(&self) -> &[TrashItem] {
        &self.items
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<&TrashItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn put(
        &mut self,
        entity: TrashedEntity,
        now: DateTime<Utc>,
        retention: TimeDelta,
    ) -> &TrashItem {
        self.items.push(TrashItem::new(entity, now, retention));
        let last = self.items.len() - 1;
        &self.items[last]
    }

    /// Removes and returns the item, if present.
    pub(crate) fn take(&mut self, id: Uuid) -> Option<TrashItem> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Removes every item with `expires_at <= now`, returning them oldest first.
    pub(crate) fn sweep(&mut self, now: DateTime<Utc>) -> Vec<TrashItem> {
        let (expired, kept) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.is_expired(now));
        self.items = kept;
        expired
    }

    pub(crate) fn drain(&mut self) -> Vec<TrashItem> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
