//! Fuzzy search over dashboard entries.
//!
//! Provides non-blocking fuzzy search for live entities and trash items.
//!
//! # Design
//!
//! - Two independent fuzzy indexes: Active and Trash.
//! - Each index is append-only (Nucleo has no deletions). Entries are keyed
//!   by kind and id, and a match is shown only while its text is the entry's
//!   current text, so removals and renames leave stale items behind.
//! - Heavy compaction/rebuild runs during periodic maintenance, not on every search.
//!
//! # Non-blocking API
//!
//! - `set_query()`: Sets the search pattern
//! - `tick()`: Drives search forward without blocking
//! - `active_results()`, `trashed_results()`: Get search results

mod config;
mod engine;
mod index;
mod query;
mod results;

pub use config::{CaseMatching, SearchConfig};
pub use engine::SearchEngine;
pub use query::SearchQuery;
pub use results::SearchResults;
