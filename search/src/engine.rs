//! Search engine with dual indexes for live and trashed entries.

use crate::config::SearchConfig;
use crate::index::{Index, key_of};
use crate::query::SearchQuery;
use crate::results::SearchResults;
use folio_core::types::EntryLabel;
use std::sync::Arc;

/// Search engine using two independent fuzzy indexes:
/// - Active index (live entities, keyed by entity id)
/// - Trash index (trash items, keyed by trash item id)
///
/// This is designed for non-blocking UI integration. The notify callback
/// is invoked when Nucleo's background worker has new results ready.
pub struct SearchEngine {
    active: Index,
    trash: Index,
    config: SearchConfig,
    active_finished: bool,
    trashed_finished: bool,
}

/// Create operations.
impl SearchEngine {
    /// Creates a new search engine with initial labels and a notification callback.
    ///
    /// Pass `FolioCore::active_labels()` and `FolioCore::trashed_labels()`.
    pub fn new(
        active: Vec<EntryLabel>,
        trashed: Vec<EntryLabel>,
        config: SearchConfig,
        notify: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        let rebuild_threshold = config.rebuild_threshold;

        Self {
            active: Index::new(active, rebuild_threshold, notify.clone()),
            trash: Index::new(trashed, rebuild_threshold, notify),
            config,
            active_finished: true,
            trashed_finished: true,
        }
    }
}

/// Mutation operations.
impl SearchEngine {
    /// Adds a live entity, e.g. after `add` or `restore`.
    ///
    /// Adding a label for an entry that is already indexed replaces its text.
    pub fn add_active(&mut self, label: EntryLabel) {
        self.active.upsert(label);
    }

    pub fn remove_active(&mut self, label: &EntryLabel) {
        self.active.remove(&key_of(label));
    }

    /// Adds a trash item, e.g. after `remove`.
    pub fn add_trashed(&mut self, label: EntryLabel) {
        self.trash.upsert(label);
    }

    pub fn remove_trashed(&mut self, label: &EntryLabel) {
        self.trash.remove(&key_of(label));
    }

    /// Removes an entry from both indexes.
    pub fn purge(&mut self, label: &EntryLabel) {
        let key = key_of(label);
        self.active.remove(&key);
        self.trash.remove(&key);
    }

    /// Replaces a label within whichever index currently holds `old`.
    pub fn relabel(&mut self, old: &EntryLabel, new: EntryLabel) {
        let old_key = key_of(old);
        let index = if self.active.contains(&old_key) {
            &mut self.active
        } else if self.trash.contains(&old_key) {
            &mut self.trash
        } else {
            return;
        };

        if key_of(&new) != old_key {
            index.remove(&old_key);
        }
        index.upsert(new);
    }
}

/// Search operations.
impl SearchEngine {
    /// Sets the search pattern.
    ///
    /// This reconfigures the Nucleo pattern for both indexes. The search runs
    /// asynchronously on Nucleo's background threadpool. Call `tick()` to
    /// drive the search forward.
    pub fn set_query(&mut self, query: SearchQuery) {
        let case_matching = self.config.nucleo_case();
        let normalization = self.config.normalization();

        for index in [&mut self.active, &mut self.trash] {
            index.nucleo_mut().pattern.reparse(
                0,
                query.pattern(),
                case_matching,
                normalization,
                false,
            );
        }

        self.active_finished = false;
        self.trashed_finished = false;
    }

    /// Drives the search forward without blocking.
    ///
    /// Returns true if either result set changed since the last tick.
    pub fn tick(&mut self) -> bool {
        let active_status = self.active.nucleo_mut().tick(0);
        let trash_status = self.trash.nucleo_mut().tick(0);

        self.active_finished = !active_status.running;
        self.trashed_finished = !trash_status.running;

        active_status.changed || trash_status.changed
    }

    /// Returns true if both indexes have finished searching.
    pub fn is_finished(&self) -> bool {
        self.active_finished && self.trashed_finished
    }

    /// Live matches, best first, capped at `active_result_limit`.
    pub fn active_results(&self) -> SearchResults<'_> {
        self.active.results(self.config.active_result_limit)
    }

    /// Trash matches, best first, capped at `trashed_result_limit`.
    pub fn trashed_results(&self) -> SearchResults<'_> {
        self.trash.results(self.config.trashed_result_limit)
    }
}

/// Maintenance operations.
impl SearchEngine {
    /// Rebuilds an index once its stale entries exceed the threshold.
    ///
    /// Call this next to `FolioCore::cleanup_expired(...)` to avoid heavy
    /// work during active UI interactions.
    pub fn maintenance_compact(&mut self) {
        self.active.compact_if_needed();
        self.trash.compact_if_needed();
    }

    /// Removed entries and old names still held by Nucleo, as (active, trash).
    pub fn stale_entries(&self) -> (usize, usize) {
        (self.active.stale(), self.trash.stale())
    }
}
