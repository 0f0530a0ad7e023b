//! Rule bodies shared by compiled rules
//!
//! Each check is a pure function from a value to `Result<(), ValidationError>`.
//! Compiled rules run every applicable check and report each failure
//! independently; nothing here aborts a validation pass.

pub mod length;
pub mod numeric;
pub mod safe_text;

pub use length::check_length;
pub use numeric::check_numeric;
pub use safe_text::{check_safe_text, is_safe_text};
