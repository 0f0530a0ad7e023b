//! Numeric range check

use crate::catalog::NumericRange;
use crate::foundation::{FieldValue, ValidationError};

/// Checks a value against a numeric range.
///
/// A value with no numeric view (text that does not parse, booleans, nil)
/// fails with `not_a_number`. Bounds are checked lower side first; the
/// range's override message, when present, replaces the default wording but
/// keeps the bound-specific error code.
pub fn check_numeric(
    field: &str,
    range: &NumericRange,
    value: &FieldValue,
) -> Result<(), ValidationError> {
    let Some(n) = value.as_number() else {
        return Err(ValidationError::not_a_number(field.to_owned()));
    };

    let fail = |code: &'static str, default: String, bound: f64| {
        let message = range
            .message
            .as_deref()
            .map_or(default, |m| m.to_owned());
        Err(ValidationError::new(code, message)
            .with_field(field.to_owned())
            .with_param("bound", bound.to_string())
            .with_param("actual", n.to_string()))
    };

    if let Some(bound) = range.greater_than {
        if n <= bound {
            return fail(
                "greater_than",
                format!("must be greater than {bound}"),
                bound,
            );
        }
    }
    if let Some(bound) = range.greater_than_or_equal_to {
        if n < bound {
            return fail(
                "greater_than_or_equal_to",
                format!("must be at least {bound}"),
                bound,
            );
        }
    }
    if let Some(bound) = range.less_than {
        if n >= bound {
            return fail("less_than", format!("must be less than {bound}"), bound);
        }
    }
    if let Some(bound) = range.less_than_or_equal_to {
        if n > bound {
            return fail(
                "less_than_or_equal_to",
                format!("must be at most {bound}"),
                bound,
            );
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
