//! Tuning for the dashboard search boxes.

use nucleo::pattern::{CaseMatching as NucleoCase, Normalization};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMatching {
    Sensitive,
    Insensitive,
    /// Case-insensitive unless query contains uppercase.
    #[default]
    Smart,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub case_matching: CaseMatching,
    /// Fold accented characters so "cafe" finds "Café".
    pub unicode_normalization: bool,
    /// Tombstones tolerated per index before `maintenance_compact` rebuilds it.
    pub rebuild_threshold: usize,
    /// Cap on live entries returned; the dashboard lists render at most this many.
    pub active_result_limit: usize,
    /// Cap on trash entries returned.
    pub trashed_result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_matching: CaseMatching::default(),
            unicode_normalization: true,
            rebuild_threshold: 100,
            active_result_limit: 50,
            trashed_result_limit: 20,
        }
    }
}

impl SearchConfig {
    pub(crate) fn nucleo_case(&self) -> NucleoCase {
        match self.case_matching {
            CaseMatching::Sensitive => NucleoCase::Respect,
            CaseMatching::Insensitive => NucleoCase::Ignore,
            CaseMatching::Smart => NucleoCase::Smart,
        }
    }

    pub(crate) fn normalization(&self) -> Normalization {
        if self.unicode_normalization {
            Normalization::Smart
        } else {
            Normalization::Never
        }
    }
}
