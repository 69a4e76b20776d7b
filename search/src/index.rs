//! Per-lifecycle fuzzy index keyed by entry identity.

use crate::results::SearchResults;
use folio_core::types::{EntityKind, EntryLabel};
use nucleo::{Config as NucleoConfig, Nucleo, Utf32String};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a dashboard entry, independent of its display text.
pub(crate) type EntryKey = (EntityKind, Uuid);

pub(crate) fn key_of(label: &EntryLabel) -> EntryKey {
    (label.kind, label.id)
}

/// Nucleo only appends. Every injected label stays in the matcher, and a
/// result is shown only while its text is still the entry's current text.
/// Removed entries and old names are stale until the next rebuild.
pub(crate) struct Index {
    nucleo: Nucleo<EntryLabel>,
    /// Visible text per entry.
    current: HashMap<EntryKey, String>,
    /// Every label pushed into Nucleo since the last rebuild.
    injected: HashSet<EntryLabel>,
    rebuild_threshold: usize,
}

impl Index {
    pub(crate) fn new(
        initial: Vec<EntryLabel>,
        rebuild_threshold: usize,
        notify: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        let mut index = Self {
            nucleo: Nucleo::new(NucleoConfig::DEFAULT, notify, None, 1),
            current: HashMap::new(),
            injected: HashSet::new(),
            rebuild_threshold,
        };

        for label in initial {
            index.upsert(label);
        }

        index
    }

    pub(crate) fn contains(&self, key: &EntryKey) -> bool {
        self.current.contains_key(key)
    }

    /// Makes `label.text` the visible text of its entry.
    ///
    /// Switching back to a text seen since the last rebuild reuses the
    /// existing Nucleo item.
    pub(crate) fn upsert(&mut self, label: EntryLabel) {
        self.current.insert(key_of(&label), label.text.clone());
        if !self.injected.contains(&label) {
            inject(&self.nucleo, label.clone());
            self.injected.insert(label);
        }
    }

    pub(crate) fn remove(&mut self, key: &EntryKey) {
        self.current.remove(key);
    }

    /// Injected labels that no longer show up in results.
    pub(crate) fn stale(&self) -> usize {
        self.injected.len().saturating_sub(self.current.len())
    }

    pub(crate) fn compact_if_needed(&mut self) {
        if self.stale() > self.rebuild_threshold {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.nucleo.restart(true);
        self.injected = self
            .current
            .iter()
            .map(|(&(kind, id), text)| EntryLabel {
                kind,
                id,
                text: text.clone(),
            })
            .collect();

        for label in &self.injected {
            inject(&self.nucleo, label.clone());
        }
    }

    pub(crate) fn results(&self, limit: usize) -> SearchResults<'_> {
        SearchResults {
            snapshot: self.nucleo.snapshot(),
            current: &self.current,
            limit,
        }
    }

    pub(crate) fn nucleo_mut(&mut self) -> &mut Nucleo<EntryLabel> {
        &mut self.nucleo
    }
}

fn inject(nucleo: &Nucleo<EntryLabel>, label: EntryLabel) {
    nucleo.injector().push(label, |item, cols| {
        cols[0] = Utf32String::from(item.text.as_str());
    });
}
