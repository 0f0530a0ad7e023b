//! Field value model
//!
//! Records hand attribute values across the validation boundary as
//! [`FieldValue`]. Pattern and length checks run against the value's
//! canonical string form; numeric checks parse that form, so a phone number
//! stored as an integer and one stored as a digit string behave identically.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An attribute value as seen by the validation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent / nil value.
    Nil,
    /// Text value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl FieldValue {
    /// Returns true for the nil value.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, FieldValue::Nil)
    }

    /// Returns the canonical string form used by pattern and length checks.
    ///
    /// Nil renders as the empty string; integers and floats use their
    /// `Display` form.
    #[must_use]
    pub fn string_form(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Nil => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Int(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(x) => Cow::Owned(x.to_string()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    /// Returns the numeric view of the value, if it has one.
    ///
    /// Text parses through `f64`; nil and booleans have no numeric view.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(x) => Some(*x),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Nil | FieldValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.string_form())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FieldValue::Nil, Into::into)
    }
}

// ============================================================================
// TESTS
// ============================================================================
