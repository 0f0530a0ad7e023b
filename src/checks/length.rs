//! Length check
//!
//! Length is counted in Unicode scalar values, not bytes, so accented and
//! multi-byte text is bounded the way a user would count it.

use crate::catalog::LengthBounds;
use crate::foundation::ValidationError;

/// Checks a value's string form against merged length bounds.
///
/// An exact bound wins over minimum/maximum. A value can violate at most one
/// side of a coherent bound pair, so a single error is returned.
pub fn check_length(
    field: &str,
    bounds: &LengthBounds,
    input: &str,
) -> Result<(), ValidationError> {
    let len = input.chars().count();

    if let Some(expected) = bounds.is {
        if len != expected {
            return Err(ValidationError::exact_length(
                field.to_owned(),
                expected,
                len,
            ));
        }
        return Ok(());
    }

    if let Some(min) = bounds.minimum {
        if len < min {
            return Err(ValidationError::min_length(field.to_owned(), min, len));
        }
    }

    if let Some(max) = bounds.maximum {
        if len > max {
            return Err(ValidationError::max_length(field.to_owned(), max, len));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
