use std::collections::BTreeMap;

use serde::ser::SerializeSeq;

use crate::{FieldName, RowId};

/// One pending cell edit.
///
/// Serializes as the `[id, field, value]` triple the change-submission
/// endpoint expects. Later edits to the same (row, field) pair are kept as
/// separate entries; the server applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: RowId,
    pub field: FieldName,
    pub value: String,
}

impl serde::Serialize for CellEdit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.row)?;
        seq.serialize_element(&self.field)?;
        seq.serialize_element(&self.value)?;
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for CellEdit {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (row, field, value) = <(RowId, FieldName, String)>::deserialize(deserializer)?;
        Ok(Self { row, field, value })
    }
}

/// A not-yet-persisted row, as field name to raw value.
///
/// Reserved for new-row creation; no current flow records one.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowDraft(pub BTreeMap<FieldName, String>);

/// The pending change-set buffered between confirmed submissions.
///
/// Four ordered sequences, appended to without deduplication or coalescing.
/// The set is empty immediately after a confirmed server round-trip and is
/// cleared only then; a failed or unanswered submission leaves every
/// sequence untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChangeSet {
    pub deletions: Vec<RowId>,
    pub edits: Vec<CellEdit>,
    pub duplications: Vec<RowId>,
    pub additions: Vec<RowDraft>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_deletion(&mut self, row: RowId) {
        self.deletions.push(row);
    }

    pub fn record_edit(&mut self, row: RowId, field: FieldName, value: impl Into<String>) {
        self.edits.push(CellEdit {
            row,
            field,
            value: value.into(),
        });
    }

    pub fn record_duplication(&mut self, row: RowId) {
        self.duplications.push(row);
    }

    pub fn record_addition(&mut self, draft: RowDraft) {
        self.additions.push(draft);
    }

    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty()
            && self.edits.is_empty()
            && self.duplications.is_empty()
            && self.additions.is_empty()
    }

    /// Total number of buffered entries across all four sequences.
    pub fn len(&self) -> usize {
        self.deletions.len() + self.edits.len() + self.duplications.len() + self.additions.len()
    }

    /// Reset to four empty sequences. Called by the sync coordinator after a
    /// confirmed submission, never on failure.
    pub fn clear(&mut self) {
        self.deletions.clear();
        self.edits.clear();
        self.duplications.clear();
        self.additions.clear();
    }
}
