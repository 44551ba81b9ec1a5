//! Per-cell edit sessions.
//!
//! A session is the transient state between activating a cell and the edit
//! control losing focus: Display → Editing → (Committing | Reverting) →
//! Display. Field identity comes from structural cell metadata, with the
//! repeated reactant/quantity/unit slots disambiguated by an explicit index;
//! malformed identity fails closed rather than guessing a mapping.

use labbook_model::{FieldName, RowId};
use labbook_validate::QUANTITY_SLOTS;

use crate::error::CoreError;

/// Field bases that repeat once per reactant slot.
const SLOTTED_FIELDS: &[&str] = &["reactant", "quantity", "unit"];

/// Structural identity of one cell: the row plus the field base and, for
/// repeated fields, which slot this cell belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub row: RowId,
    pub base: String,
    pub slot: Option<u8>,
}

impl CellRef {
    pub fn new(row: RowId, base: impl Into<String>) -> Self {
        Self {
            row,
            base: base.into(),
            slot: None,
        }
    }

    pub fn slotted(row: RowId, base: impl Into<String>, slot: u8) -> Self {
        Self {
            row,
            base: base.into(),
            slot: Some(slot),
        }
    }

    /// Resolve the server field name this cell edits.
    ///
    /// Repeated fields require a slot within `1..=QUANTITY_SLOTS`; a slot on
    /// a non-repeated field is just as malformed. Both fail closed.
    pub fn field(&self) -> Result<FieldName, CoreError> {
        let base = self.base.trim();
        if SLOTTED_FIELDS.contains(&base) {
            let Some(slot) = self.slot else {
                return Err(CoreError::MissingSlot {
                    base: base.to_string(),
                });
            };
            if slot == 0 || slot > QUANTITY_SLOTS {
                return Err(CoreError::SlotOutOfRange {
                    base: base.to_string(),
                    slot,
                });
            }
            Ok(FieldName::new(format!("{base}_{slot}"))?)
        } else {
            if let Some(slot) = self.slot {
                return Err(CoreError::UnexpectedSlot {
                    base: base.to_string(),
                    slot,
                });
            }
            Ok(FieldName::new(base)?)
        }
    }
}

/// The editable control a cell turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditControl {
    /// Closed choice list, pre-selected to the current value when it is one
    /// of the options.
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Free-text input sized to the original display width.
    Text { width: u16 },
}

/// One open edit session. At most one exists per cell; it is consumed by
/// commit and holds the original text for comparison and revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub row: RowId,
    pub field: FieldName,
    pub original: String,
    pub control: EditControl,
}

/// What committing a session produced. `display` is the text the cell shows
/// back in the Display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The entered value equals the original; nothing recorded, nothing
    /// submitted.
    Unchanged,
    /// Accepted and buffered; an immediate submission cycle follows.
    Committed { display: String },
    /// Rejected by the validator; the edit is discarded and the cell
    /// reverts to the original text.
    Rejected { display: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64) -> RowId {
        RowId::new(id).expect("positive id")
    }

    #[test]
    fn plain_fields_resolve_directly() {
        let cell = CellRef::new(row(3), "temp");
        assert_eq!(cell.field().expect("resolves").as_str(), "temp");
    }

    #[test]
    fn slotted_fields_append_their_index() {
        let cell = CellRef::slotted(row(3), "quantity", 4);
        assert_eq!(cell.field().expect("resolves").as_str(), "quantity_4");
    }

    #[test]
    fn malformed_identity_fails_closed() {
        assert!(matches!(
            CellRef::new(row(1), "quantity").field(),
            Err(CoreError::MissingSlot { .. })
        ));
        assert!(matches!(
            CellRef::slotted(row(1), "unit", 6).field(),
            Err(CoreError::SlotOutOfRange { slot: 6, .. })
        ));
        assert!(matches!(
            CellRef::slotted(row(1), "temp", 1).field(),
            Err(CoreError::UnexpectedSlot { .. })
        ));
        assert!(CellRef::new(row(1), "  ").field().is_err());
    }
}
