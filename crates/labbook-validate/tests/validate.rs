//! Tests for the field validator.

use labbook_model::FieldName;
use labbook_validate::{FieldRegistry, ValidationLimits};
use proptest::prelude::*;

fn field(name: &str) -> FieldName {
    FieldName::new(name).expect("field name")
}

fn registry() -> FieldRegistry {
    FieldRegistry::standard()
}

#[test]
fn mass_fields_accept_strict_open_range() {
    let registry = registry();
    for slot in 1..=5u8 {
        let name = field(&format!("quantity_{slot}"));
        assert!(registry.validate(&name, "0.5"));
        assert!(registry.validate(&name, "14.9"));
        assert!(!registry.validate(&name, "0"));
        assert!(!registry.validate(&name, "15"));
        assert!(!registry.validate(&name, "-1"));
        assert!(!registry.validate(&name, "grams"));
    }
}

#[test]
fn mass_fields_reject_long_decimals() {
    let registry = registry();
    let name = field("quantity_1");
    // 2.00000001 coerces to a ten-character string.
    assert!(!registry.validate(&name, "2.00000001"));
    assert!(registry.validate(&name, "2.0000001"));
}

#[test]
fn temp_boundaries_reject() {
    let registry = registry();
    let temp = field("temp");
    assert!(registry.validate(&temp, "0.1"));
    assert!(registry.validate(&temp, "399.9"));
    assert!(!registry.validate(&temp, "0"));
    assert!(!registry.validate(&temp, "400"));
    assert!(!registry.validate(&temp, "500"));
}

#[test]
fn ph_spans_negative_range() {
    let registry = registry();
    let ph = field("pH");
    assert!(registry.validate(&ph, "-0.5"));
    assert!(registry.validate(&ph, "7"));
    assert!(registry.validate(&ph, "15.9"));
    assert!(!registry.validate(&ph, "-1"));
    assert!(!registry.validate(&ph, "16"));
}

#[test]
fn outcome_and_purity_are_inclusive() {
    let registry = registry();
    let outcome = field("outcome");
    assert!(registry.validate(&outcome, "0"));
    assert!(registry.validate(&outcome, "4"));
    assert!(!registry.validate(&outcome, "5"));

    let purity = field("purity");
    assert!(registry.validate(&purity, "0"));
    assert!(registry.validate(&purity, "2"));
    assert!(!registry.validate(&purity, "3"));
    assert!(!registry.validate(&purity, "-1"));
}

#[test]
fn time_is_a_strict_open_range() {
    let registry = registry();
    let time = field("time");
    assert!(registry.validate(&time, "12"));
    assert!(!registry.validate(&time, "0"));
    assert!(!registry.validate(&time, "350"));
}

#[test]
fn tri_state_fields_accept_case_insensitively() {
    let registry = registry();
    for name in ["slow_cool", "leak"] {
        let name = field(name);
        assert!(registry.validate(&name, "Yes"));
        assert!(registry.validate(&name, "no"));
        assert!(registry.validate(&name, "?"));
        assert!(!registry.validate(&name, "probably"));
        assert!(!registry.validate(&name, ""));
    }
}

#[test]
fn ref_length_bounds() {
    let registry = registry();
    let reference = field("ref");
    assert!(registry.validate(&reference, "A"));
    assert!(registry.validate(&reference, "ABCDEFGH"));
    assert!(!registry.validate(&reference, ""));
    assert!(!registry.validate(&reference, "ABCDEFGHI"));
}

#[test]
fn unknown_fields_fail_open() {
    let registry = registry();
    assert!(registry.validate(&field("notes"), "anything at all"));
    assert!(registry.validate(&field("reactant_2"), "ammonium chloride"));
    assert!(!registry.knows(&field("notes")));
}

#[test]
fn non_numeric_input_for_numeric_fields_fails_closed() {
    let registry = registry();
    for name in ["temp", "pH", "time", "outcome", "purity", "quantity_3"] {
        let name = field(name);
        assert!(!registry.validate(&name, "NaN-ish"));
        assert!(!registry.validate(&name, ""));
        assert!(!registry.validate(&name, "12abc"));
    }
}

#[test]
fn edit_choices_cover_closed_fields() {
    let registry = registry();
    assert_eq!(
        registry.edit_choices(&field("outcome")).expect("outcome"),
        vec!["0", "1", "2", "3", "4"]
    );
    assert_eq!(
        registry.edit_choices(&field("purity")).expect("purity"),
        vec!["0", "1", "2"]
    );
    assert_eq!(
        registry.edit_choices(&field("unit_4")).expect("unit"),
        vec!["g", "mL", "d"]
    );
    assert_eq!(
        registry.edit_choices(&field("leak")).expect("leak"),
        vec!["Yes", "No", "?"]
    );
    assert!(registry.edit_choices(&field("temp")).is_none());
    assert!(registry.edit_choices(&field("ref")).is_none());
    assert!(registry.edit_choices(&field("notes")).is_none());
}

#[test]
fn limits_overrides_deserialize_partially() {
    let limits: ValidationLimits =
        serde_json::from_str(r#"{"temp": [0.0, 600.0]}"#).expect("partial limits");
    assert_eq!(limits.temp, (0.0, 600.0));
    assert_eq!(limits.quantity, (0.0, 15.0));

    let registry = FieldRegistry::from_limits(&limits).expect("sane limits");
    assert!(registry.validate(&field("temp"), "500"));
}

#[test]
fn inverted_limits_are_refused() {
    let limits = ValidationLimits {
        temp: (400.0, 0.0),
        ..ValidationLimits::default()
    };
    assert!(FieldRegistry::from_limits(&limits).is_err());
}

proptest! {
    #[test]
    fn mass_acceptance_matches_the_range_rule(value in -20.0f64..40.0) {
        let registry = registry();
        let raw = value.to_string();
        let expected = 0.0 < value && value < 15.0 && raw.chars().count() < 10;
        prop_assert_eq!(registry.validate(&field("quantity_1"), &raw), expected);
    }

    #[test]
    fn temp_acceptance_matches_the_range_rule(value in -100.0f64..500.0) {
        let registry = registry();
        let raw = value.to_string();
        let expected = 0.0 < value && value < 400.0;
        prop_assert_eq!(registry.validate(&field("temp"), &raw), expected);
    }

    #[test]
    fn arbitrary_text_never_panics(field_name in "[a-zA-Z_]{1,12}", raw in ".{0,40}") {
        let registry = registry();
        let _ = registry.validate(&field(&field_name), &raw);
    }
}
