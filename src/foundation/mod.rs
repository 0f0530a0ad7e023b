//! Core types shared by every part of the crate
//!
//! - **Errors**: [`ValidationError`], [`ValidationErrors`] (data tier) and
//!   [`DeclarationError`] (configuration tier)
//! - **Values**: [`FieldValue`], the unit records hand across the boundary
//!
//! The two error tiers are separate types: a declaration problem halts
//! startup, while a validation failure is a plain value reported to an
//! error sink.

pub mod error;
pub mod value;

pub use error::{DeclarationError, ErrorParams, ValidationError, ValidationErrors};
pub use value::FieldValue;

/// A configuration-tier result.
pub type DeclarationResult<T> = Result<T, DeclarationError>;
