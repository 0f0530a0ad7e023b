//! Validation pipeline
//!
//! A [`Pipeline`] is the ordered set of compiled rules attached to one record
//! type. Running it walks every rule against a record and accumulates the
//! failures; rules never see each other's results, so pipelines for different
//! record types are fully independent.

use tracing::trace;

use crate::compiled::CompiledRule;
use crate::foundation::{FieldValue, ValidationError, ValidationErrors};

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// A record under validation.
///
/// Field access is by name; a missing field reads as [`FieldValue::Nil`].
pub trait Record {
    /// Returns the value of the named field.
    fn field(&self, name: &str) -> FieldValue;

    /// Evaluates the named predicate (conditional rules ask for `"{field}?"`).
    ///
    /// Records with no such predicate should return false, which skips the
    /// conditional rule.
    fn predicate(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}

/// Lookup against persisted records, used by uniqueness rules.
pub trait RecordStore {
    /// Returns true if another record already holds `value` in `field`.
    fn value_taken(&self, field: &str, value: &FieldValue) -> bool;
}

/// A store with no persisted records; nothing is ever taken.
///
/// The right collaborator when validating in isolation or when no rule in the
/// pipeline is a uniqueness rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshStore;

impl RecordStore for FreshStore {
    fn value_taken(&self, _field: &str, _value: &FieldValue) -> bool {
        false
    }
}

/// Receiver for validation failures.
pub trait ErrorSink {
    /// Records one failure. Must not abort the pass.
    fn report(&mut self, error: ValidationError);
}

impl ErrorSink for ValidationErrors {
    fn report(&mut self, error: ValidationError) {
        self.add(error);
    }
}

impl ErrorSink for Vec<ValidationError> {
    fn report(&mut self, error: ValidationError) {
        self.push(error);
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// The ordered rules attached to one record type.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    rules: Vec<CompiledRule>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a compiled rule. Rules run in registration order.
    pub fn register(&mut self, rule: CompiledRule) {
        trace!(field = rule.field(), kind = %rule.kind(), "registered rule");
        self.rules.push(rule);
    }

    /// The registered rules, in order.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against the record, accumulating all failures.
    #[must_use]
    pub fn run(&self, record: &dyn Record, store: &dyn RecordStore) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            rule.check(record, store, &mut errors);
        }
        errors
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::RuleKind;
    use crate::compiler::{compile, RuleOptions};

    struct MapRecord {
        fields: HashMap<&'static str, FieldValue>,
        predicates: HashMap<&'static str, bool>,
    }

    impl MapRecord {
        fn new() -> Self {
            Self {
                fields: HashMap::new(),
                predicates: HashMap::new(),
            }
        }

        fn set(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
            self.fields.insert(name, value.into());
            self
        }

        fn answer(mut self, name: &'static str, yes: bool) -> Self {
            self.predicates.insert(name, yes);
            self
        }
    }

    impl Record for MapRecord {
        fn field(&self, name: &str) -> FieldValue {
            self.fields.get(name).cloned().unwrap_or(FieldValue::Nil)
        }

        fn predicate(&self, name: &str) -> bool {
            self.predicates.get(name).copied().unwrap_or(false)
        }
    }

    struct TakenStore(&'static str);

    impl RecordStore for TakenStore {
        fn value_taken(&self, _field: &str, value: &FieldValue) -> bool {
            value.string_form() == self.0
        }
    }

    fn rule(kind: RuleKind, field: &str) -> CompiledRule {
        compile(kind, field, &RuleOptions::new()).unwrap()
    }

    #[test]
    fn test_clean_record_produces_no_errors() {
        let mut pipeline = Pipeline::new();
        pipeline.register(rule(RuleKind::Email, "email"));
        pipeline.register(rule(RuleKind::Age, "age"));

        let record = MapRecord::new()
            .set("email", "ada@example.com")
            .set("age", 36i64);
        let errors = pipeline.run(&record, &FreshStore);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_failures_accumulate_across_rules() {
        let mut pipeline = Pipeline::new();
        pipeline.register(rule(RuleKind::Email, "email"));
        pipeline.register(rule(RuleKind::Age, "age"));

        let record = MapRecord::new().set("email", "nope").set("age", 200i64);
        let errors = pipeline.run(&record, &FreshStore);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("email").count(), 1);
        assert_eq!(errors.for_field("age").count(), 1);
    }

    #[test]
    fn test_condition_gates_the_rule() {
        let options = RuleOptions::new().conditional();
        let mut pipeline = Pipeline::new();
        pipeline.register(compile(RuleKind::Zipcode, "zip", &options).unwrap());

        let record = MapRecord::new().set("zip", "not-a-zip").answer("zip?", false);
        assert!(pipeline.run(&record, &FreshStore).is_empty());

        let record = MapRecord::new().set("zip", "not-a-zip").answer("zip?", true);
        assert_eq!(pipeline.run(&record, &FreshStore).len(), 1);
    }

    #[test]
    fn test_allow_nil_skips_missing_field() {
        let options = RuleOptions::new().allow_nil();
        let mut pipeline = Pipeline::new();
        pipeline.register(compile(RuleKind::Email, "email", &options).unwrap());

        assert!(pipeline.run(&MapRecord::new(), &FreshStore).is_empty());
    }

    #[test]
    fn test_nil_without_allow_nil_is_checked_as_empty() {
        let mut pipeline = Pipeline::new();
        pipeline.register(rule(RuleKind::Email, "email"));

        let errors = pipeline.run(&MapRecord::new(), &FreshStore);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, "invalid_format");
    }

    #[test]
    fn test_uniqueness_asks_the_store() {
        let mut pipeline = Pipeline::new();
        pipeline.register(rule(RuleKind::Username, "username"));

        let record = MapRecord::new().set("username", "ada_l");
        assert!(pipeline.run(&record, &FreshStore).is_empty());

        let errors = pipeline.run(&record, &TakenStore("ada_l"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, "taken");
    }

    #[test]
    fn test_pipelines_are_independent() {
        let mut strict = Pipeline::new();
        strict.register(
            compile(RuleKind::Email, "email", &RuleOptions::new().maximum_length(12)).unwrap(),
        );
        let mut lax = Pipeline::new();
        lax.register(rule(RuleKind::Email, "email"));

        let record = MapRecord::new().set("email", "long.address@example.com");
        assert_eq!(strict.run(&record, &FreshStore).len(), 1);
        assert!(lax.run(&record, &FreshStore).is_empty());
    }
}
