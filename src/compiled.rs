//! Compiled per-field rule
//!
//! The immutable product of the compiler: everything needed to check one
//! field of one record type, with messages already rendered and the regex
//! already built. Checks accumulate; a rule reports every failure it finds
//! rather than stopping at the first.

use regex::Regex;

use crate::catalog::{LengthBounds, NumericRange, RuleKind, ValuePredicate};
use crate::checks::{check_length, check_numeric, check_safe_text};
use crate::foundation::ValidationError;
use crate::pipeline::{ErrorSink, Record, RecordStore};

/// A fully compiled validation rule for one field.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub(crate) field: String,
    pub(crate) kind: RuleKind,
    pub(crate) pattern: Option<Regex>,
    pub(crate) pattern_message: Option<String>,
    pub(crate) length: Option<LengthBounds>,
    pub(crate) numeric: Option<NumericRange>,
    pub(crate) predicate: Option<ValuePredicate>,
    pub(crate) unique: bool,
    pub(crate) condition: Option<String>,
    pub(crate) allow_nil: bool,
}

impl CompiledRule {
    /// Field this rule checks.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Rule kind this rule was compiled from.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Source of the compiled pattern, if any.
    #[must_use]
    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Rendered message reported on a pattern mismatch.
    #[must_use]
    pub fn pattern_message(&self) -> Option<&str> {
        self.pattern_message.as_deref()
    }

    /// Length bounds, if any.
    #[must_use]
    pub fn length(&self) -> Option<&LengthBounds> {
        self.length.as_ref()
    }

    /// Numeric range, if any.
    #[must_use]
    pub fn numeric(&self) -> Option<&NumericRange> {
        self.numeric.as_ref()
    }

    /// Name of the record predicate gating this rule, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Whether the field's value must be unique across persisted records.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether a nil value skips every check.
    #[must_use]
    pub fn allow_nil(&self) -> bool {
        self.allow_nil
    }

    /// Runs every applicable check against the record, reporting each
    /// failure to the sink independently.
    ///
    /// Two gates short-circuit the whole rule: a false condition predicate,
    /// and a nil value when `allow_nil` is set. A nil value without
    /// `allow_nil` is checked as the empty string.
    pub fn check(&self, record: &dyn Record, store: &dyn RecordStore, sink: &mut dyn ErrorSink) {
        if let Some(condition) = &self.condition {
            if !record.predicate(condition) {
                return;
            }
        }

        let value = record.field(&self.field);
        if value.is_nil() && self.allow_nil {
            return;
        }
        let text = value.string_form();

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(&text) {
                let message = self
                    .pattern_message
                    .clone()
                    .unwrap_or_else(|| format!("is invalid for {}", self.field));
                sink.report(
                    ValidationError::invalid_format(self.field.clone(), message)
                        .with_param("value", text.clone().into_owned()),
                );
            }
        }

        if let Some(bounds) = &self.length {
            if let Err(error) = check_length(&self.field, bounds, &text) {
                sink.report(error);
            }
        }

        if let Some(range) = &self.numeric {
            if let Err(error) = check_numeric(&self.field, range, &value) {
                sink.report(error);
            }
        }

        if let Some(ValuePredicate::SafeText) = self.predicate {
            if let Err(error) = check_safe_text(&self.field, &text) {
                sink.report(error);
            }
        }

        if self.unique && store.value_taken(&self.field, &value) {
            sink.report(
                ValidationError::taken(self.field.clone())
                    .with_param("value", text.into_owned()),
            );
        }
    }
}
