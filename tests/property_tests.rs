//! Property-based tests for compiled rules.

use proptest::prelude::*;
use record_validator::prelude::*;

struct OneField(FieldValue);

impl Record for OneField {
    fn field(&self, _name: &str) -> FieldValue {
        self.0.clone()
    }
}

fn run_once(kind: RuleKind, options: &RuleOptions, value: FieldValue) -> ValidationErrors {
    let rule = compile(kind, "field", options).unwrap();
    let mut pipeline = Pipeline::new();
    pipeline.register(rule);
    pipeline.run(&OneField(value), &FreshStore)
}

// ============================================================================
// DETERMINISM: the same rule on the same value always agrees
// ============================================================================

proptest! {
    #[test]
    fn email_is_deterministic(s in ".*") {
        let options = RuleOptions::new();
        let first = run_once(RuleKind::Email, &options, FieldValue::from(s.clone()));
        let second = run_once(RuleKind::Email, &options, FieldValue::from(s));
        prop_assert_eq!(first.is_empty(), second.is_empty());
    }

    #[test]
    fn age_is_deterministic(n in any::<i64>()) {
        let options = RuleOptions::new();
        let first = run_once(RuleKind::Age, &options, FieldValue::Int(n));
        let second = run_once(RuleKind::Age, &options, FieldValue::Int(n));
        prop_assert_eq!(first.is_empty(), second.is_empty());
    }
}

// ============================================================================
// COMPILATION: arbitrary coherent options always compile
// ============================================================================

proptest! {
    #[test]
    fn coherent_length_options_compile(min in 0usize..100, extra in 0usize..100) {
        let options = RuleOptions::new().within_length(min, min + extra);
        prop_assert!(compile(RuleKind::Email, "field", &options).is_ok());
    }

    #[test]
    fn inverted_length_options_never_compile(max in 0usize..100, extra in 1usize..100) {
        let options = RuleOptions::new().within_length(max + extra, max);
        prop_assert!(compile(RuleKind::Email, "field", &options).is_err());
    }

    #[test]
    fn any_precision_compiles_on_the_decimal_family(precision in 0u32..20) {
        let options = RuleOptions::new().precision_length(precision);
        let rule = compile(RuleKind::Dollar, "field", &options).unwrap();
        prop_assert!(rule.pattern_source().is_some());
    }
}

// ============================================================================
// DECIMAL PRECISION: exactly `precision` fractional digits is the cutoff
// ============================================================================

proptest! {
    #[test]
    fn precision_bounds_fractional_digits(whole in 0i64..10_000, precision in 1u32..8) {
        let options = RuleOptions::new().precision_length(precision);

        let at_limit = format!("{whole}.{}", "1".repeat(precision as usize));
        let over = format!("{whole}.{}", "1".repeat(precision as usize + 1));

        prop_assert!(run_once(RuleKind::Dollar, &options, FieldValue::from(at_limit)).is_empty());
        prop_assert!(!run_once(RuleKind::Dollar, &options, FieldValue::from(over)).is_empty());
    }
}

// ============================================================================
// NUMERIC EQUIVALENCE: ints and their text form validate identically
// ============================================================================

proptest! {
    #[test]
    fn int_and_text_agree_on_age(n in -1000i64..1000) {
        let options = RuleOptions::new();
        let as_int = run_once(RuleKind::Age, &options, FieldValue::Int(n));
        let as_text = run_once(RuleKind::Age, &options, FieldValue::from(n.to_string()));
        prop_assert_eq!(as_int.is_empty(), as_text.is_empty());
    }

    #[test]
    fn age_range_matches_its_bounds(n in -1000i64..1000) {
        let errors = run_once(RuleKind::Age, &RuleOptions::new(), FieldValue::Int(n));
        prop_assert_eq!(errors.is_empty(), (0..=110).contains(&n));
    }
}

// ============================================================================
// SAFE TEXT: printable input never fails, control input always does
// ============================================================================

proptest! {
    #[test]
    fn printable_text_is_safe(s in "[a-zA-Z0-9 .,!?\n\t]{0,200}") {
        prop_assert!(run_once(RuleKind::SafeText, &RuleOptions::new(), FieldValue::from(s)).is_empty());
    }

    #[test]
    fn embedded_control_char_is_never_safe(prefix in "[a-z]{0,20}", suffix in "[a-z]{0,20}") {
        let s = format!("{prefix}\u{7}{suffix}");
        prop_assert!(!run_once(RuleKind::SafeText, &RuleOptions::new(), FieldValue::from(s)).is_empty());
    }
}
