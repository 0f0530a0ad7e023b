//! Error types for the two failure tiers
//!
//! Configuration-time problems (unknown rule kind, malformed options, empty
//! declaration sets) are programming errors and surface immediately as
//! [`DeclarationError`]. Validation-time failures are data problems: they are
//! reported as [`ValidationError`] values to an error sink and never abort a
//! validation pass.
//!
//! String fields use `Cow<'static, str>` so the common case of static error
//! codes and messages allocates nothing.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

// ============================================================================
// DECLARATION ERRORS (configuration tier)
// ============================================================================

/// Fatal errors raised while attaching validation rules to a record type.
///
/// These indicate a mistake in the declaration itself, not bad data, and are
/// meant to halt startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The rule-kind name is not part of the fixed catalog.
    #[error("unknown rule kind `{0}`")]
    UnknownRuleKind(String),

    /// The options supplied for a field are incoherent.
    #[error("malformed options for field `{field}`: {reason}")]
    MalformedOptions {
        /// Field whose options failed to compile.
        field: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// The declaration set contained no fields.
    #[error("declaration set must name at least one field")]
    EmptyDeclaration,
}

impl DeclarationError {
    /// Creates a `MalformedOptions` error.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOptions {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// VALIDATION ERROR (data tier)
// ============================================================================

/// Parameters attached to a validation error.
///
/// Most errors carry 0-3 params, so they live inline on the stack.
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 3]>;

/// A single field-scoped validation failure.
///
/// # Examples
///
/// ```rust,ignore
/// let error = ValidationError::new("invalid_format", "should look like an email address for email")
///     .with_field("email")
///     .with_param("value", "not-an-email");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Error code for programmatic handling ("invalid_format", "max_length", ...).
    pub code: Cow<'static, str>,

    /// Rendered, human-readable message. Pattern failures follow the
    /// `"<stem> for <field>"` convention.
    pub message: Cow<'static, str>,

    /// Field the failure is scoped to.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value params for message templating.
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: ErrorParams::new(),
        }
    }

    /// Sets the field this error is scoped to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Renders the error as a JSON value.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates an "invalid_format" error with the rendered pattern message.
    pub fn invalid_format(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new("invalid_format", message).with_field(field)
    }

    /// Creates a "min_length" error.
    pub fn min_length(field: impl Into<Cow<'static, str>>, min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("must be at least {min} characters"))
            .with_field(field)
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "max_length" error.
    pub fn max_length(field: impl Into<Cow<'static, str>>, max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("must be at most {max} characters"))
            .with_field(field)
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "exact_length" error.
    pub fn exact_length(field: impl Into<Cow<'static, str>>, expected: usize, actual: usize) -> Self {
        Self::new(
            "exact_length",
            format!("must be exactly {expected} characters"),
        )
        .with_field(field)
        .with_param("expected", expected.to_string())
        .with_param("actual", actual.to_string())
    }

    /// Creates a "not_a_number" error for numeric rules on non-numeric input.
    pub fn not_a_number(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("not_a_number", "is not a number").with_field(field)
    }

    /// Creates a "taken" uniqueness error.
    pub fn taken(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("taken", "has already been taken").with_field(field)
    }

    /// Creates an "unsafe_text" error for the control-character predicate.
    pub fn unsafe_text(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("unsafe_text", "contains non-printable characters").with_field(field)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Accumulates validation errors across fields during one validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors in report order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the errors scoped to one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================
