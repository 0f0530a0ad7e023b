//! The rule catalog
//!
//! A fixed, closed mapping from [`RuleKind`] to [`RuleTemplate`]. The table
//! is pure enum dispatch: [`lookup`] builds a fresh template value per call,
//! so there is no shared state to initialize and nothing a caller could
//! mutate under another caller's feet.
//!
//! Catalog entries are field-agnostic. A template's pattern message is a
//! *stem* ("should look like an email address"); the compiler appends
//! `" for <field>"` once the field name is known, which is why the same
//! template serves any number of differently-named fields.

pub mod template;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::{DeclarationError, DeclarationResult};

pub use template::{LengthBounds, NumericRange, PatternSpec, RuleTemplate, ValuePredicate};

// ============================================================================
// PATTERN SOURCES
// ============================================================================

const EMAIL: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
const URL: &str = r"^https?://[^\s/$.?#].[^\s]*$";
const DOMAIN: &str = r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$";
const USERNAME: &str = r"^[a-zA-Z0-9_]+$";
const RAILS_NAME: &str = r"^[a-z][a-z0-9_]*$";
const ZIPCODE: &str = r"^[0-9]{5}(-[0-9]{4})?$";
const MIDDLE_INITIAL: &str = r"^[a-zA-Z]$";
const DIGITS: &str = r"^[0-9]+$";
const INTEGER: &str = r"^-?[0-9]+$";
const SSN: &str = r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$";
const TAXID: &str = r"^[0-9]{2}-[0-9]{7}$";

// ============================================================================
// RULE KIND
// ============================================================================

/// The closed set of rule-kind names.
///
/// Immutable once built; adding a kind means adding a variant and a table
/// entry, never registering at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Name,
    SafeText,
    Username,
    RailsName,
    Email,
    PhoneNumber,
    PhoneExtension,
    Domain,
    Zipcode,
    MiddleInitial,
    Dollar,
    PositiveDollar,
    Percent,
    PositivePercent,
    ComparativePercent,
    PositiveComparativePercent,
    Url,
    SocialSecurityNumber,
    Taxid,
    Age,
    Number,
    Description,
}

impl RuleKind {
    /// Every kind in the catalog, in declaration order.
    pub const ALL: [RuleKind; 22] = [
        RuleKind::Name,
        RuleKind::SafeText,
        RuleKind::Username,
        RuleKind::RailsName,
        RuleKind::Email,
        RuleKind::PhoneNumber,
        RuleKind::PhoneExtension,
        RuleKind::Domain,
        RuleKind::Zipcode,
        RuleKind::MiddleInitial,
        RuleKind::Dollar,
        RuleKind::PositiveDollar,
        RuleKind::Percent,
        RuleKind::PositivePercent,
        RuleKind::ComparativePercent,
        RuleKind::PositiveComparativePercent,
        RuleKind::Url,
        RuleKind::SocialSecurityNumber,
        RuleKind::Taxid,
        RuleKind::Age,
        RuleKind::Number,
        RuleKind::Description,
    ];

    /// The snake_case name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Name => "name",
            RuleKind::SafeText => "safe_text",
            RuleKind::Username => "username",
            RuleKind::RailsName => "rails_name",
            RuleKind::Email => "email",
            RuleKind::PhoneNumber => "phone_number",
            RuleKind::PhoneExtension => "phone_extension",
            RuleKind::Domain => "domain",
            RuleKind::Zipcode => "zipcode",
            RuleKind::MiddleInitial => "middle_initial",
            RuleKind::Dollar => "dollar",
            RuleKind::PositiveDollar => "positive_dollar",
            RuleKind::Percent => "percent",
            RuleKind::PositivePercent => "positive_percent",
            RuleKind::ComparativePercent => "comparative_percent",
            RuleKind::PositiveComparativePercent => "positive_comparative_percent",
            RuleKind::Url => "url",
            RuleKind::SocialSecurityNumber => "social_security_number",
            RuleKind::Taxid => "taxid",
            RuleKind::Age => "age",
            RuleKind::Number => "number",
            RuleKind::Description => "description",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DeclarationError::UnknownRuleKind(s.to_owned()))
    }
}

// ============================================================================
// LOOKUP
// ============================================================================

/// Returns a fresh copy of the template for `kind`.
#[must_use]
pub fn lookup(kind: RuleKind) -> RuleTemplate {
    let base = RuleTemplate::empty(kind);
    match kind {
        RuleKind::Name => RuleTemplate {
            predicate: Some(ValuePredicate::SafeText),
            length: Some(LengthBounds::at_most(100)),
            ..base
        },
        RuleKind::SafeText => RuleTemplate {
            predicate: Some(ValuePredicate::SafeText),
            length: Some(LengthBounds::at_most(10_000)),
            ..base
        },
        RuleKind::Username => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(USERNAME)),
            message: Some("may contain only letters, numbers, and underscores"),
            length: Some(LengthBounds::within(3, 40)),
            unique: true,
            ..base
        },
        RuleKind::RailsName => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(RAILS_NAME)),
            message: Some("must be a lowercase identifier"),
            ..base
        },
        RuleKind::Email => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(EMAIL)),
            message: Some("should look like an email address"),
            ..base
        },
        RuleKind::PhoneNumber => RuleTemplate {
            numeric: Some(
                NumericRange::between(1_000_000_000.0, 9_999_999_999.0)
                    .with_message("should be a 10 digit phone number"),
            ),
            ..base
        },
        RuleKind::PhoneExtension => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(DIGITS)),
            message: Some("may contain only digits"),
            length: Some(LengthBounds::at_most(10)),
            ..base
        },
        RuleKind::Domain => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(DOMAIN)),
            message: Some("should be a valid domain"),
            ..base
        },
        RuleKind::Zipcode => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(ZIPCODE)),
            message: Some("should be a valid zip code"),
            ..base
        },
        RuleKind::MiddleInitial => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(MIDDLE_INITIAL)),
            message: Some("should be a single letter"),
            ..base
        },
        RuleKind::Dollar => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a dollar amount"),
            ..base
        },
        RuleKind::PositiveDollar => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a positive dollar amount"),
            numeric: Some(NumericRange::at_least(0.0)),
            ..base
        },
        RuleKind::Percent => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a percentage"),
            numeric: Some(NumericRange::between(-100.0, 100.0)),
            ..base
        },
        RuleKind::PositivePercent => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a positive percentage"),
            numeric: Some(NumericRange::between(0.0, 100.0)),
            ..base
        },
        // Comparative percentages measure change against a baseline and may
        // exceed 100.
        RuleKind::ComparativePercent => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a percentage"),
            numeric: Some(NumericRange::at_least(-100.0)),
            ..base
        },
        RuleKind::PositiveComparativePercent => RuleTemplate {
            pattern: Some(PatternSpec::Decimal { precision: 2 }),
            message: Some("should be a positive percentage"),
            numeric: Some(NumericRange::at_least(0.0)),
            ..base
        },
        RuleKind::Url => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(URL)),
            message: Some("should be a valid url"),
            ..base
        },
        RuleKind::SocialSecurityNumber => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(SSN)),
            message: Some("should look like a social security number"),
            ..base
        },
        RuleKind::Taxid => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(TAXID)),
            message: Some("should look like a tax id"),
            ..base
        },
        RuleKind::Age => RuleTemplate {
            numeric: Some(
                NumericRange::between(0.0, 110.0).with_message("should be between 0 and 110"),
            ),
            ..base
        },
        RuleKind::Number => RuleTemplate {
            pattern: Some(PatternSpec::Fixed(INTEGER)),
            message: Some("should be a number"),
            ..base
        },
        RuleKind::Description => RuleTemplate {
            predicate: Some(ValuePredicate::SafeText),
            length: Some(LengthBounds::at_most(5000)),
            ..base
        },
    }
}

/// Looks up a template by its string name.
///
/// Fails with [`DeclarationError::UnknownRuleKind`] for names outside the
/// fixed set.
pub fn lookup_name(name: &str) -> DeclarationResult<RuleTemplate> {
    name.parse::<RuleKind>().map(lookup)
}

// ============================================================================
// TESTS
// ============================================================================
