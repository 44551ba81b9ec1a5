//! The selection set: row ids marked selected, independent of pagination.
//!
//! Membership survives page navigation; the view re-applies highlighting from
//! this set after every replacement, never the reverse. The size is tracked
//! redundantly as a counter that must always equal the set's cardinality.

use std::collections::BTreeSet;

use tracing::debug;

use labbook_model::RowId;

/// Result of a per-page toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToggle {
    /// Rows not yet selected on the page were added.
    Selected { added: usize },
    /// The page was already fully selected, so exactly its rows were removed.
    Cleared { removed: usize },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: BTreeSet<RowId>,
    len: usize,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether the row
    /// is selected afterwards.
    pub fn toggle(&mut self, id: RowId) -> bool {
        let selected = if self.ids.remove(&id) {
            self.len -= 1;
            false
        } else {
            self.ids.insert(id);
            self.len += 1;
            true
        };
        debug_assert_eq!(self.len, self.ids.len());
        selected
    }

    /// Select every row on the page not yet selected; if the page was
    /// already fully selected at call time, deselect exactly its rows.
    ///
    /// "Fully selected" is measured against `page_capacity`, not the number
    /// of rows actually rendered, so a short final page never reaches the
    /// deselect branch.
    pub fn toggle_page(&mut self, page_rows: &[RowId], page_capacity: usize) -> PageToggle {
        let already_selected = page_rows.iter().filter(|id| self.ids.contains(id)).count();
        let toggle = if already_selected == page_capacity {
            let mut removed = 0;
            for id in page_rows {
                if self.ids.remove(id) {
                    self.len -= 1;
                    removed += 1;
                }
            }
            PageToggle::Cleared { removed }
        } else {
            let mut added = 0;
            for id in page_rows {
                if self.ids.insert(*id) {
                    self.len += 1;
                    added += 1;
                }
            }
            PageToggle::Selected { added }
        };
        debug_assert_eq!(self.len, self.ids.len());
        debug!(selected = self.len, ?toggle, "page toggle");
        toggle
    }

    /// Clear when everything is selected, otherwise select ids
    /// `1..=total_rows`.
    pub fn toggle_all(&mut self, total_rows: u64) {
        if self.len as u64 == total_rows {
            self.clear();
        } else {
            self.ids = (1..=total_rows)
                .map(|id| RowId::new(id).expect("row ids start at 1"))
                .collect();
            self.len = self.ids.len();
        }
        debug_assert_eq!(self.len, self.ids.len());
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RowId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.len, self.ids.len());
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.len = 0;
    }
}
