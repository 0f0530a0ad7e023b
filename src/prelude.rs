//! Prelude module for convenient imports.
//!
//! Provides a single `use record_validator::prelude::*;` import that brings
//! in everything needed to declare, attach and run validation rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use record_validator::prelude::*;
//!
//! let declarations = Declarations::new()
//!     .field("email", RuleKind::Email)
//!     .field_with("login", RuleKind::Username, RuleOptions::new().maximum_length(20));
//! ```

// ============================================================================
// FOUNDATION: values and the two error tiers
// ============================================================================

pub use crate::foundation::{
    DeclarationError, DeclarationResult, FieldValue, ValidationError, ValidationErrors,
};

// ============================================================================
// CATALOG AND COMPILER
// ============================================================================

pub use crate::catalog::{LengthBounds, NumericRange, RuleKind, RuleTemplate};
pub use crate::compiled::CompiledRule;
pub use crate::compiler::{compile, RuleOption, RuleOptions};

// ============================================================================
// ATTACHMENT AND PIPELINE
// ============================================================================

pub use crate::attach::{attach, Declaration, Declarations};
pub use crate::pipeline::{ErrorSink, FreshStore, Pipeline, Record, RecordStore};
