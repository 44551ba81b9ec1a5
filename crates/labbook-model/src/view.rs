use std::collections::BTreeMap;

use crate::{FieldName, RowId};

/// One rendered row: the server cells plus the client-side selection mark.
///
/// `selected` is derived state. It is re-applied from the selection set after
/// every view replacement, never the other way around.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowView {
    pub id: RowId,
    pub cells: BTreeMap<FieldName, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl RowView {
    pub fn new(id: RowId, cells: BTreeMap<FieldName, String>) -> Self {
        Self {
            id,
            cells,
            selected: false,
        }
    }

    pub fn cell(&self, field: &FieldName) -> Option<&str> {
        self.cells.get(field).map(String::as_str)
    }
}

/// One page of rows as returned by the page-data endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageView {
    pub number: u32,
    pub rows: Vec<RowView>,
}

/// Dataset totals used to size pagination and the select-all toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DatasetSnapshot {
    pub total_rows: u64,
    pub page_size: usize,
}

impl DatasetSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }

    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 || self.total_rows == 0 {
            return 0;
        }
        self.total_rows.div_ceil(self.page_size as u64) as u32
    }
}
