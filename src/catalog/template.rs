//! Rule templates
//!
//! A [`RuleTemplate`] is the catalog's field-agnostic description of one rule
//! kind: an optional pattern, a pattern-message *stem* (the field name is
//! appended at compile time, not here), length bounds, a numeric range, and
//! the uniqueness / conditional / allow-nil flags.
//!
//! Templates are plain values. The compiler copies and overrides them; it
//! never mutates a catalog entry, so compiling one field can never leak
//! options into another.

use std::borrow::Cow;

use super::RuleKind;

// ============================================================================
// PATTERN SPEC
// ============================================================================

/// The regex source a template carries.
///
/// The dollar family stores its pattern as `Decimal { precision }` so the
/// `precision_length` option can regenerate the fractional-digit bound
/// instead of string-editing a regex tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSpec {
    /// A fixed, fully-anchored regex source.
    Fixed(&'static str),
    /// An optionally-signed decimal with up to `precision` fractional digits.
    Decimal {
        /// Maximum number of fractional digits accepted.
        precision: u32,
    },
}

impl PatternSpec {
    /// Returns the regex source for this pattern.
    #[must_use]
    pub fn source(&self) -> Cow<'static, str> {
        match self {
            PatternSpec::Fixed(src) => Cow::Borrowed(src),
            PatternSpec::Decimal { precision } => {
                Cow::Owned(format!(r"^-?[0-9]+(\.[0-9]{{0,{precision}}})?$"))
            }
        }
    }

    /// Returns true if this is a rewritable decimal pattern.
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        matches!(self, PatternSpec::Decimal { .. })
    }

    /// Returns the pattern with its fractional precision replaced.
    ///
    /// `None` for fixed patterns: only the decimal family supports the
    /// `precision_length` rewrite.
    #[must_use]
    pub fn with_precision(self, precision: u32) -> Option<Self> {
        match self {
            PatternSpec::Decimal { .. } => Some(PatternSpec::Decimal { precision }),
            PatternSpec::Fixed(_) => None,
        }
    }
}

// ============================================================================
// LENGTH BOUNDS
// ============================================================================

/// Length constraints on the value's string form, counted in chars.
///
/// Bounds merge field-wise: a caller's `maximum_length` lands in `maximum`
/// without disturbing a template's `minimum`. An exact bound wins over
/// minimum/maximum when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthBounds {
    /// Exact required length.
    pub is: Option<usize>,
    /// Minimum length (inclusive).
    pub minimum: Option<usize>,
    /// Maximum length (inclusive).
    pub maximum: Option<usize>,
}

impl LengthBounds {
    /// Bounds with only a maximum.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self {
            maximum: Some(max),
            ..Self::default()
        }
    }

    /// Bounds with only a minimum.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self {
            minimum: Some(min),
            ..Self::default()
        }
    }

    /// Bounds with an inclusive minimum and maximum.
    #[must_use]
    pub fn within(min: usize, max: usize) -> Self {
        Self {
            minimum: Some(min),
            maximum: Some(max),
            ..Self::default()
        }
    }

    /// Bounds requiring an exact length.
    #[must_use]
    pub fn exactly(len: usize) -> Self {
        Self {
            is: Some(len),
            ..Self::default()
        }
    }

    /// Returns true if no bound is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is.is_none() && self.minimum.is_none() && self.maximum.is_none()
    }

    /// Returns true if `minimum <= maximum` (or either is absent).
    #[must_use]
    pub fn is_coherent(&self) -> bool {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

// ============================================================================
// NUMERIC RANGE
// ============================================================================

/// Numeric constraints on the value, any combination of the four bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericRange {
    /// Exclusive lower bound.
    pub greater_than: Option<f64>,
    /// Inclusive lower bound.
    pub greater_than_or_equal_to: Option<f64>,
    /// Exclusive upper bound.
    pub less_than: Option<f64>,
    /// Inclusive upper bound.
    pub less_than_or_equal_to: Option<f64>,
    /// Override message reported for any failing bound.
    pub message: Option<Cow<'static, str>>,
}

impl NumericRange {
    /// Range with only an inclusive lower bound.
    #[must_use]
    pub fn at_least(bound: f64) -> Self {
        Self {
            greater_than_or_equal_to: Some(bound),
            ..Self::default()
        }
    }

    /// Range with inclusive lower and upper bounds.
    #[must_use]
    pub fn between(lo: f64, hi: f64) -> Self {
        Self {
            greater_than_or_equal_to: Some(lo),
            less_than_or_equal_to: Some(hi),
            ..Self::default()
        }
    }

    /// Attaches an override message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns true if no bound is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.greater_than.is_none()
            && self.greater_than_or_equal_to.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal_to.is_none()
    }
}

// ============================================================================
// VALUE PREDICATE
// ============================================================================

/// Custom rule bodies shared by several kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePredicate {
    /// After stripping `\n`, `\r` and `\t`, no control character may remain.
    SafeText,
}

// ============================================================================
// RULE TEMPLATE
// ============================================================================

/// The catalog entry for one rule kind.
#[derive(Debug, Clone)]
pub struct RuleTemplate {
    /// The kind this template belongs to.
    pub kind: RuleKind,
    /// Pattern the value's string form must fully match.
    pub pattern: Option<PatternSpec>,
    /// Message stem for pattern failures; rendered as `"<stem> for <field>"`
    /// once the field name is known.
    pub message: Option<&'static str>,
    /// Length bounds on the string form.
    pub length: Option<LengthBounds>,
    /// Numeric range on the value.
    pub numeric: Option<NumericRange>,
    /// Custom predicate body.
    pub predicate: Option<ValuePredicate>,
    /// Whether the value must be unique across persisted records.
    pub unique: bool,
    /// Whether the rule is gated on the record's `"{field}?"` predicate.
    pub has_if: bool,
    /// Whether a nil value skips every check.
    pub allow_nil: bool,
}

impl RuleTemplate {
    /// An empty template for `kind`; the catalog table fills in constraints.
    #[must_use]
    pub fn empty(kind: RuleKind) -> Self {
        Self {
            kind,
            pattern: None,
            message: None,
            length: None,
            numeric: None,
            predicate: None,
            unique: false,
            has_if: false,
            allow_nil: false,
        }
    }

    /// Returns true if the template carries at least one enforceable
    /// constraint. An empty rule is a catalog bug.
    #[must_use]
    pub fn has_constraint(&self) -> bool {
        self.pattern.is_some()
            || self.length.map_or(false, |l| !l.is_empty())
            || self.numeric.as_ref().map_or(false, |n| !n.is_empty())
            || self.unique
    }
}

// ============================================================================
// TESTS
// ============================================================================
