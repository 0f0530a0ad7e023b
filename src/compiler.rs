//! Rule compiler
//!
//! Turns a catalog template plus caller-supplied per-field options into a
//! [`CompiledRule`]. Merging is ordered:
//!
//! 1. look up the template for the kind;
//! 2. resolve conditional activation (caller flag or template flag) into the
//!    `"{field}?"` predicate name;
//! 3. fold the length-option family into the template's bounds, with the
//!    `precision_length` special case rewriting the decimal pattern's
//!    fractional-digit bound instead of becoming a length bound;
//! 4. apply the remaining raw overrides (allow_nil, numeric bounds, message),
//!    caller values winning on collision;
//! 5. render message stems with the actual field name and compile the regex.
//!
//! The catalog entry is never mutated; every call builds a fresh rule.

use std::borrow::Cow;

use regex::Regex;
use tracing::debug;

use crate::catalog::{self, RuleKind};
use crate::compiled::CompiledRule;
use crate::foundation::{DeclarationError, DeclarationResult};

// ============================================================================
// RULE OPTIONS
// ============================================================================

/// One caller-supplied option.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOption {
    /// Exact length (`length`).
    Length(usize),
    /// Minimum length (`minimum_length`).
    MinimumLength(usize),
    /// Maximum length (`maximum_length`).
    MaximumLength(usize),
    /// Inclusive length range (`within_length`).
    WithinLength(usize, usize),
    /// Fractional-digit bound for decimal patterns (`precision_length`).
    /// Not a length bound; see the module docs.
    PrecisionLength(u32),
    /// Gate the rule on the record's `"{field}?"` predicate.
    Conditional,
    /// Let a nil value skip every check.
    AllowNil(bool),
    /// Exclusive numeric lower bound.
    GreaterThan(f64),
    /// Inclusive numeric lower bound.
    GreaterThanOrEqualTo(f64),
    /// Exclusive numeric upper bound.
    LessThan(f64),
    /// Inclusive numeric upper bound.
    LessThanOrEqualTo(f64),
    /// Replace the template's message stem.
    Message(Cow<'static, str>),
}

impl RuleOption {
    fn is_length_family(&self) -> bool {
        matches!(
            self,
            RuleOption::Length(_)
                | RuleOption::MinimumLength(_)
                | RuleOption::MaximumLength(_)
                | RuleOption::WithinLength(..)
                | RuleOption::PrecisionLength(_)
        )
    }
}

/// Ordered set of per-field options.
///
/// Order matters only for duplicate keys: later entries win, matching the
/// merge semantics of the compiler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOptions {
    entries: Vec<RuleOption>,
}

impl RuleOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no options were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the options in supply order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleOption> {
        self.entries.iter()
    }

    fn push(mut self, option: RuleOption) -> Self {
        self.entries.push(option);
        self
    }

    /// Requires an exact length.
    #[must_use]
    pub fn length(self, len: usize) -> Self {
        self.push(RuleOption::Length(len))
    }

    /// Requires a minimum length.
    #[must_use]
    pub fn minimum_length(self, min: usize) -> Self {
        self.push(RuleOption::MinimumLength(min))
    }

    /// Requires a maximum length.
    #[must_use]
    pub fn maximum_length(self, max: usize) -> Self {
        self.push(RuleOption::MaximumLength(max))
    }

    /// Requires a length within an inclusive range.
    #[must_use]
    pub fn within_length(self, min: usize, max: usize) -> Self {
        self.push(RuleOption::WithinLength(min, max))
    }

    /// Bounds the fractional digits of a decimal pattern.
    #[must_use]
    pub fn precision_length(self, precision: u32) -> Self {
        self.push(RuleOption::PrecisionLength(precision))
    }

    /// Gates the rule on the record's `"{field}?"` predicate.
    #[must_use]
    pub fn conditional(self) -> Self {
        self.push(RuleOption::Conditional)
    }

    /// Lets a nil value skip every check.
    #[must_use]
    pub fn allow_nil(self) -> Self {
        self.push(RuleOption::AllowNil(true))
    }

    /// Adds an exclusive numeric lower bound.
    #[must_use]
    pub fn greater_than(self, bound: f64) -> Self {
        self.push(RuleOption::GreaterThan(bound))
    }

    /// Adds an inclusive numeric lower bound.
    #[must_use]
    pub fn greater_than_or_equal_to(self, bound: f64) -> Self {
        self.push(RuleOption::GreaterThanOrEqualTo(bound))
    }

    /// Adds an exclusive numeric upper bound.
    #[must_use]
    pub fn less_than(self, bound: f64) -> Self {
        self.push(RuleOption::LessThan(bound))
    }

    /// Adds an inclusive numeric upper bound.
    #[must_use]
    pub fn less_than_or_equal_to(self, bound: f64) -> Self {
        self.push(RuleOption::LessThanOrEqualTo(bound))
    }

    /// Replaces the template's message stem.
    #[must_use]
    pub fn message(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.push(RuleOption::Message(message.into()))
    }
}

// ============================================================================
// COMPILE
// ============================================================================

/// Compiles the rule for one field.
///
/// # Errors
///
/// [`DeclarationError::MalformedOptions`] when the options are incoherent:
/// inverted length bounds, or `precision_length` on a kind without a decimal
/// pattern.
pub fn compile(kind: RuleKind, field: &str, options: &RuleOptions) -> DeclarationResult<CompiledRule> {
    let template = catalog::lookup(kind);

    // Conditional activation: the caller flag or the template's own.
    let conditional = template.has_if
        || options
            .iter()
            .any(|opt| matches!(opt, RuleOption::Conditional));
    let condition = conditional.then(|| format!("{field}?"));

    // Length family. Bounds merge field-wise onto the template's;
    // precision_length is a pattern rewrite, never a length bound.
    let mut pattern = template.pattern;
    let mut length = template.length.unwrap_or_default();
    for option in options.iter().filter(|opt| opt.is_length_family()) {
        match *option {
            RuleOption::Length(len) => length.is = Some(len),
            RuleOption::MinimumLength(min) => length.minimum = Some(min),
            RuleOption::MaximumLength(max) => length.maximum = Some(max),
            RuleOption::WithinLength(min, max) => {
                if min > max {
                    return Err(DeclarationError::malformed(
                        field,
                        format!("within_length bounds are inverted ({min} > {max})"),
                    ));
                }
                length.minimum = Some(min);
                length.maximum = Some(max);
            }
            RuleOption::PrecisionLength(precision) => {
                pattern = Some(
                    pattern
                        .and_then(|p| p.with_precision(precision))
                        .ok_or_else(|| {
                            DeclarationError::malformed(
                                field,
                                format!("precision_length requires a decimal pattern, `{kind}` has none"),
                            )
                        })?,
                );
            }
            _ => unreachable!("filtered to the length family"),
        }
    }
    if !length.is_coherent() {
        return Err(DeclarationError::malformed(
            field,
            "minimum_length exceeds maximum_length",
        ));
    }

    // Remaining raw overrides; caller values win over template defaults.
    let mut allow_nil = template.allow_nil;
    let mut numeric = template.numeric.unwrap_or_default();
    let mut stem: Option<Cow<'static, str>> = template.message.map(Cow::Borrowed);
    for option in options.iter().filter(|opt| !opt.is_length_family()) {
        match option {
            RuleOption::AllowNil(allowed) => allow_nil = *allowed,
            RuleOption::GreaterThan(bound) => numeric.greater_than = Some(*bound),
            RuleOption::GreaterThanOrEqualTo(bound) => {
                numeric.greater_than_or_equal_to = Some(*bound);
            }
            RuleOption::LessThan(bound) => numeric.less_than = Some(*bound),
            RuleOption::LessThanOrEqualTo(bound) => {
                numeric.less_than_or_equal_to = Some(*bound);
            }
            RuleOption::Message(message) => stem = Some(message.clone()),
            RuleOption::Conditional => {}
            _ => unreachable!("length family handled above"),
        }
    }

    // Message stems are rendered here, with the actual field name: the
    // catalog is field-agnostic, the compiled rule is not.
    let pattern_message = stem.map(|s| render_message(&s, field));
    if let Some(numeric_stem) = numeric.message.take() {
        numeric.message = Some(Cow::Owned(render_message(&numeric_stem, field)));
    }

    let pattern = pattern
        .map(|spec| {
            Regex::new(&spec.source()).map_err(|e| {
                DeclarationError::malformed(field, format!("pattern failed to compile: {e}"))
            })
        })
        .transpose()?;

    debug!(kind = %kind, field, "compiled validation rule");

    Ok(CompiledRule {
        field: field.to_owned(),
        kind,
        pattern,
        pattern_message,
        length: (!length.is_empty()).then_some(length),
        numeric: (!numeric.is_empty()).then_some(numeric),
        predicate: template.predicate,
        unique: template.unique,
        condition,
        allow_nil,
    })
}

/// Renders a message stem with the field-name suffix.
fn render_message(stem: &str, field: &str) -> String {
    format!("{stem} for {field}")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_come_from_template() {
        let rule = compile(RuleKind::Email, "contact_email", &RuleOptions::new()).unwrap();
        assert_eq!(rule.field(), "contact_email");
        assert_eq!(
            rule.pattern_message(),
            Some("should look like an email address for contact_email")
        );
        assert!(rule.condition().is_none());
        assert!(!rule.allow_nil());
    }

    #[test]
    fn test_maximum_length_is_a_plain_bound() {
        let options = RuleOptions::new().maximum_length(10);
        let rule = compile(RuleKind::Email, "email", &options).unwrap();
        assert_eq!(rule.length().unwrap().maximum, Some(10));
        // The pattern is untouched: maximum_length is not precision_length.
        assert!(rule.pattern_source().unwrap().contains("@"));
    }

    #[test]
    fn test_precision_rewrites_the_decimal_tail() {
        let options = RuleOptions::new().precision_length(4);
        let rule = compile(RuleKind::Dollar, "price", &options).unwrap();
        assert_eq!(
            rule.pattern_source().unwrap(),
            r"^-?[0-9]+(\.[0-9]{0,4})?$"
        );
        // And it never becomes a length bound.
        assert!(rule.length().is_none());
    }

    #[test]
    fn test_precision_on_non_decimal_kind_fails_fast() {
        let options = RuleOptions::new().precision_length(4);
        let err = compile(RuleKind::Zipcode, "zip", &options).unwrap_err();
        assert!(matches!(err, DeclarationError::MalformedOptions { .. }));

        // A kind with no pattern at all fails the same way.
        let err = compile(RuleKind::Age, "age", &options).unwrap_err();
        assert!(matches!(err, DeclarationError::MalformedOptions { .. }));
    }

    #[test]
    fn test_conditional_targets_the_field_predicate() {
        let options = RuleOptions::new().conditional();
        let rule = compile(RuleKind::Zipcode, "mailing_zip", &options).unwrap();
        assert_eq!(rule.condition(), Some("mailing_zip?"));
    }

    #[test]
    fn test_length_merges_onto_template_bounds() {
        // username template is within(3, 40); the caller tightens the max.
        let options = RuleOptions::new().maximum_length(20);
        let rule = compile(RuleKind::Username, "login", &options).unwrap();
        let bounds = rule.length().unwrap();
        assert_eq!(bounds.minimum, Some(3));
        assert_eq!(bounds.maximum, Some(20));
    }

    #[test]
    fn test_incoherent_bounds_fail() {
        let options = RuleOptions::new().within_length(9, 2);
        assert!(compile(RuleKind::Email, "email", &options).is_err());

        let options = RuleOptions::new().minimum_length(50).maximum_length(10);
        assert!(compile(RuleKind::Email, "email", &options).is_err());
    }

    #[test]
    fn test_numeric_overrides_win() {
        // age template is 0..=110; the caller narrows the top.
        let options = RuleOptions::new().less_than_or_equal_to(65.0);
        let rule = compile(RuleKind::Age, "age", &options).unwrap();
        let range = rule.numeric().unwrap();
        assert_eq!(range.greater_than_or_equal_to, Some(0.0));
        assert_eq!(range.less_than_or_equal_to, Some(65.0));
    }

    #[test]
    fn test_message_override() {
        let options = RuleOptions::new().message("is not a valid work email");
        let rule = compile(RuleKind::Email, "work_email", &options).unwrap();
        assert_eq!(
            rule.pattern_message(),
            Some("is not a valid work email for work_email")
        );
    }

    #[test]
    fn test_numeric_message_is_rendered_with_field() {
        let rule = compile(RuleKind::PhoneNumber, "phone", &RuleOptions::new()).unwrap();
        assert_eq!(
            rule.numeric().unwrap().message.as_deref(),
            Some("should be a 10 digit phone number for phone")
        );
    }

    #[test]
    fn test_allow_nil_override() {
        let options = RuleOptions::new().allow_nil();
        let rule = compile(RuleKind::Email, "email", &options).unwrap();
        assert!(rule.allow_nil());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let options = RuleOptions::new().maximum_length(10).maximum_length(8);
        let rule = compile(RuleKind::Email, "email", &options).unwrap();
        assert_eq!(rule.length().unwrap().maximum, Some(8));
    }
}
