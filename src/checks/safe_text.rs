//! Safe-text predicate
//!
//! Shared rule body for the `safe_text`, `name` and `description` kinds:
//! ordinary whitespace control characters (`\n`, `\r`, `\t`) are stripped,
//! then any remaining control character fails the value. Empty input passes
//! trivially; presence/absence is the `allow_nil` / required-field layer's
//! concern, not this predicate's.

use crate::foundation::ValidationError;

/// Returns true if the input contains no control characters other than
/// newline, carriage return and tab.
#[must_use]
pub fn is_safe_text(input: &str) -> bool {
    input
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .all(|c| !c.is_control())
}

/// Checks a value's string form with the safe-text predicate.
pub fn check_safe_text(field: &str, input: &str) -> Result<(), ValidationError> {
    if is_safe_text(input) {
        Ok(())
    } else {
        Err(ValidationError::unsafe_text(field.to_owned()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
