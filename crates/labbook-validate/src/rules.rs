//! Per-field validation rules.
//!
//! Each rule is a pure check over the raw text a user typed. Numeric rules
//! coerce the text to a number first; a failed coercion rejects (fail-closed
//! on error). Fields without any declared rule are handled by the registry,
//! which accepts them (fail-open on unknown).

/// The validation rule attached to one field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Numeric value strictly within `(min, max)`. When `max_text_len` is
    /// set, the coerced value formatted back to a string must be shorter
    /// than it (keeps pathologically long decimals out of mass fields).
    Decimal {
        min: f64,
        max: f64,
        max_text_len: Option<usize>,
    },
    /// Numeric score inclusively within `[min, max]`; edited via a choice
    /// list enumerating the integers in range.
    Score { min: i64, max: i64 },
    /// Case-insensitive membership in a fixed option list.
    Choice { options: Vec<String> },
    /// Non-empty string of at most `max_len` characters.
    Text { max_len: usize },
    /// No client-side rule; the declared options only shape the edit
    /// control. The server still validates.
    Open { options: Vec<String> },
}

impl FieldKind {
    /// Apply the rule to raw user input.
    pub fn check(&self, raw: &str) -> bool {
        match self {
            Self::Decimal {
                min,
                max,
                max_text_len,
            } => {
                let Some(value) = coerce_number(raw) else {
                    return false;
                };
                if let Some(limit) = max_text_len
                    && value.to_string().chars().count() >= *limit
                {
                    return false;
                }
                *min < value && value < *max
            }
            Self::Score { min, max } => {
                let Some(value) = coerce_number(raw) else {
                    return false;
                };
                *min as f64 <= value && value <= *max as f64
            }
            Self::Choice { options } => options
                .iter()
                .any(|option| option.eq_ignore_ascii_case(raw)),
            Self::Text { max_len } => {
                let len = raw.chars().count();
                0 < len && len <= *max_len
            }
            Self::Open { .. } => true,
        }
    }

    /// Options for a closed edit control, when the field has one.
    pub fn edit_choices(&self) -> Option<Vec<String>> {
        match self {
            Self::Score { min, max } => Some((*min..=*max).map(|n| n.to_string()).collect()),
            Self::Choice { options } | Self::Open { options } => Some(options.clone()),
            Self::Decimal { .. } | Self::Text { .. } => None,
        }
    }
}

/// Coerce raw text to a finite number, or reject.
fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
