//! Search results types.

use crate::index::{EntryKey, key_of};
use folio_core::types::EntryLabel;
use nucleo::Snapshot;
use std::collections::HashMap;

/// Search results snapshot that provides zero-copy iteration.
///
/// Borrows from the SearchEngine. Use `iter()` to iterate over matched
/// labels, best match first, without collecting.
pub struct SearchResults<'a> {
    pub(crate) snapshot: &'a Snapshot<EntryLabel>,
    pub(crate) current: &'a HashMap<EntryKey, String>,
    pub(crate) limit: usize,
}

impl<'a> SearchResults<'a> {
    /// Iterates over matched labels whose text is still current.
    pub fn iter(&self) -> impl Iterator<Item = &EntryLabel> + '_ {
        self.snapshot
            .matched_items(..)
            .map(|item| item.data)
            .filter(|label| self.is_current(label))
            .take(self.limit)
    }

    fn is_current(&self, label: &EntryLabel) -> bool {
        self.current
            .get(&key_of(label))
            .is_some_and(|text| *text == label.text)
    }
}
