//! In-memory reference transport.
//!
//! Not a server: a stand-in honoring the change-submission contract so the
//! coordinator protocol can be exercised end to end by tests and the CLI
//! harness. Applies deletions, then edits, then duplications, re-validating
//! edits with its own registry, and commits the batch atomically.

use std::collections::BTreeMap;

use tracing::debug;

use labbook_model::{ChangeSet, DatasetSnapshot, FieldName, PageView, RowId, RowView};
use labbook_validate::FieldRegistry;

use crate::transport::{ChangeTransport, SubmitOutcome, TransportError};

type Cells = BTreeMap<FieldName, String>;

#[derive(Debug)]
pub struct MemoryTransport {
    rows: BTreeMap<RowId, Cells>,
    page_size: usize,
    registry: FieldRegistry,
    next_id: u64,
}

impl MemoryTransport {
    pub fn new(page_size: usize, registry: FieldRegistry) -> Self {
        Self {
            rows: BTreeMap::new(),
            page_size,
            registry,
            next_id: 1,
        }
    }

    /// Insert a record and return its assigned id.
    pub fn seed_row(&mut self, cells: Cells) -> RowId {
        let id = RowId::new(self.next_id).expect("ids start at 1");
        self.next_id += 1;
        self.rows.insert(id, cells);
        id
    }

    pub fn row(&self, id: RowId) -> Option<&Cells> {
        self.rows.get(&id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn apply(&self, changes: &ChangeSet) -> Result<BTreeMap<RowId, Cells>, String> {
        let mut rows = self.rows.clone();

        for id in &changes.deletions {
            rows.remove(id);
        }

        for edit in &changes.edits {
            if !self.registry.validate(&edit.field, &edit.value) {
                return Err(format!("invalid value for {}", edit.field));
            }
            // Rows deleted earlier in the same batch no longer take edits.
            if let Some(cells) = rows.get_mut(&edit.row) {
                cells.insert(edit.field.clone(), edit.value.clone());
            }
        }

        Ok(rows)
    }
}

impl ChangeTransport for MemoryTransport {
    fn submit_changes(&mut self, changes: &ChangeSet) -> Result<SubmitOutcome, TransportError> {
        debug!(pending = changes.len(), "memory transport received batch");
        let mut rows = match self.apply(changes) {
            Ok(rows) => rows,
            Err(message) => return Ok(SubmitOutcome::Rejected(message)),
        };

        let mut next_id = self.next_id;
        for id in &changes.duplications {
            let Some(cells) = rows.get(id).cloned() else {
                continue;
            };
            let copy = RowId::new(next_id).expect("ids start at 1");
            next_id += 1;
            rows.insert(copy, cells);
        }

        self.rows = rows;
        self.next_id = next_id;
        Ok(SubmitOutcome::Accepted)
    }

    fn fetch_page(&mut self, page: u32) -> Result<PageView, TransportError> {
        if page == 0 {
            return Err(TransportError::Malformed("pages are 1-based".to_string()));
        }
        let start = (page as usize - 1) * self.page_size;
        let rows = self
            .rows
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|(id, cells)| RowView::new(*id, cells.clone()))
            .collect();
        Ok(PageView { number: page, rows })
    }

    fn fetch_snapshot(&mut self) -> Result<DatasetSnapshot, TransportError> {
        Ok(DatasetSnapshot {
            total_rows: self.rows.len() as u64,
            page_size: self.page_size,
        })
    }
}
