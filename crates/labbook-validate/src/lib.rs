//! Optimistic client-side validation for laboratory record fields.
//!
//! The rules here intentionally duplicate the server's so the UI can reject
//! obviously bad input without a round-trip; the server remains authoritative
//! and re-validates every change independently.

mod registry;
mod rules;

pub use registry::{FieldRegistry, LimitsError, QUANTITY_SLOTS, ValidationLimits};
pub use rules::FieldKind;
