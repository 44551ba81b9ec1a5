//! The static field-descriptor table.
//!
//! Field kinds are declared per exact field name up front, not inferred from
//! markup strings at edit time. Unknown fields validate as true: the server
//! owns the authoritative rules and the client must not block fields it does
//! not know about.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use labbook_model::FieldName;

use crate::rules::FieldKind;

/// Number of repeated reactant/quantity/unit slots per record.
pub const QUANTITY_SLOTS: u8 = 5;

#[derive(Debug, Error)]
pub enum LimitsError {
    #[error("empty range for {field}: min {min} is not below max {max}")]
    EmptyRange { field: &'static str, min: f64, max: f64 },
    #[error("{field} length limit must be positive")]
    ZeroLength { field: &'static str },
}

/// Client-side validation limits.
///
/// These deliberately duplicate the server-side ranges for responsiveness;
/// the server re-validates every submitted change independently. Deserialize
/// a partial override from configuration to tune them without touching the
/// rule code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Mass range in grams, exclusive on both ends.
    pub quantity: (f64, f64),
    /// Coerced mass text must be shorter than this many characters.
    pub quantity_text_len: usize,
    /// Temperature range in Celsius, exclusive.
    pub temp: (f64, f64),
    /// Acidity range, exclusive.
    pub ph: (f64, f64),
    /// Outcome score range, inclusive.
    pub outcome: (i64, i64),
    /// Purity score range, inclusive.
    pub purity: (i64, i64),
    /// Duration range in hours, exclusive.
    pub time: (f64, f64),
    /// Maximum reference citation length in characters.
    pub ref_len: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            quantity: (0.0, 15.0),
            quantity_text_len: 10,
            temp: (0.0, 400.0),
            ph: (-1.0, 16.0),
            outcome: (0, 4),
            purity: (0, 2),
            time: (0.0, 350.0),
            ref_len: 8,
        }
    }
}

impl ValidationLimits {
    fn ensure_sane(&self) -> Result<(), LimitsError> {
        for (field, range) in [
            ("quantity", self.quantity),
            ("temp", self.temp),
            ("ph", self.ph),
            ("time", self.time),
        ] {
            if range.0 >= range.1 {
                return Err(LimitsError::EmptyRange {
                    field,
                    min: range.0,
                    max: range.1,
                });
            }
        }
        for (field, range) in [("outcome", self.outcome), ("purity", self.purity)] {
            if range.0 > range.1 {
                return Err(LimitsError::EmptyRange {
                    field,
                    min: range.0 as f64,
                    max: range.1 as f64,
                });
            }
        }
        if self.quantity_text_len == 0 {
            return Err(LimitsError::ZeroLength {
                field: "quantity_text_len",
            });
        }
        if self.ref_len == 0 {
            return Err(LimitsError::ZeroLength { field: "ref_len" });
        }
        Ok(())
    }
}

/// Field-descriptor table: field name → validation rule and edit choices.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    rules: BTreeMap<String, FieldKind>,
}

impl FieldRegistry {
    /// Registry with the standard laboratory-record fields and limits.
    pub fn standard() -> Self {
        Self::from_limits(&ValidationLimits::default()).expect("default limits are sane")
    }

    /// Build the registry from configured limits.
    pub fn from_limits(limits: &ValidationLimits) -> Result<Self, LimitsError> {
        limits.ensure_sane()?;
        let mut rules = BTreeMap::new();

        for slot in 1..=QUANTITY_SLOTS {
            rules.insert(
                format!("quantity_{slot}"),
                FieldKind::Decimal {
                    min: limits.quantity.0,
                    max: limits.quantity.1,
                    max_text_len: Some(limits.quantity_text_len),
                },
            );
            rules.insert(
                format!("unit_{slot}"),
                FieldKind::Open {
                    options: vec!["g".into(), "mL".into(), "d".into()],
                },
            );
        }
        rules.insert(
            "temp".into(),
            FieldKind::Decimal {
                min: limits.temp.0,
                max: limits.temp.1,
                max_text_len: None,
            },
        );
        rules.insert(
            "pH".into(),
            FieldKind::Decimal {
                min: limits.ph.0,
                max: limits.ph.1,
                max_text_len: None,
            },
        );
        rules.insert(
            "time".into(),
            FieldKind::Decimal {
                min: limits.time.0,
                max: limits.time.1,
                max_text_len: None,
            },
        );
        rules.insert(
            "outcome".into(),
            FieldKind::Score {
                min: limits.outcome.0,
                max: limits.outcome.1,
            },
        );
        rules.insert(
            "purity".into(),
            FieldKind::Score {
                min: limits.purity.0,
                max: limits.purity.1,
            },
        );
        let tri_state = FieldKind::Choice {
            options: vec!["Yes".into(), "No".into(), "?".into()],
        };
        rules.insert("slow_cool".into(), tri_state.clone());
        rules.insert("leak".into(), tri_state);
        rules.insert(
            "ref".into(),
            FieldKind::Text {
                max_len: limits.ref_len,
            },
        );

        Ok(Self { rules })
    }

    /// Validate raw input against the field's declared rule.
    ///
    /// Unknown fields accept (fail-open); any coercion or comparison failure
    /// inside a declared rule rejects (fail-closed).
    pub fn validate(&self, field: &FieldName, raw: &str) -> bool {
        match self.rules.get(field.as_str()) {
            Some(kind) => {
                let ok = kind.check(raw);
                if !ok {
                    debug!(field = %field, "rejected value client-side");
                }
                ok
            }
            None => true,
        }
    }

    /// Choice list for the field's edit control, if it has a closed one.
    pub fn edit_choices(&self, field: &FieldName) -> Option<Vec<String>> {
        self.rules.get(field.as_str())?.edit_choices()
    }

    /// Whether the field has a declared rule at all.
    pub fn knows(&self, field: &FieldName) -> bool {
        self.rules.contains_key(field.as_str())
    }
}
