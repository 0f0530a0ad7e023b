//! # record-validator
//!
//! Declarative attribute validation for record types: a fixed catalog of
//! named rule kinds, a compiler that merges per-field options onto the
//! catalog's templates, and a per-record-type pipeline that runs the
//! compiled rules and accumulates every failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use record_validator::prelude::*;
//!
//! let declarations = Declarations::new()
//!     .field("email", RuleKind::Email)
//!     .field_with("price", RuleKind::Dollar, RuleOptions::new().precision_length(4))
//!     .field("age", RuleKind::Age);
//!
//! let mut pipeline = Pipeline::new();
//! attach(&mut pipeline, &declarations)?;
//!
//! let errors = pipeline.run(&record, &FreshStore);
//! ```
//!
//! ## Rule Kinds
//!
//! Every kind in [`catalog::RuleKind`] carries at least one constraint:
//! a pattern (`email`, `zipcode`, `url`, ...), length bounds (`name`,
//! `description`, ...), a numeric range (`age`, `phone_number`, the percent
//! family), the safe-text predicate, or uniqueness (`username`). Options
//! tighten or override a template; they never invent a new kind.

// ValidationError carries a code, message, field and inline params — boxing it
// would add indirection to every check for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod attach;
pub mod catalog;
pub mod checks;
pub mod compiled;
pub mod compiler;
pub mod foundation;
pub mod pipeline;
pub mod prelude;

pub use attach::{attach, Declaration, Declarations};
pub use catalog::RuleKind;
pub use compiled::CompiledRule;
pub use compiler::{compile, RuleOption, RuleOptions};
pub use foundation::{
    DeclarationError, DeclarationResult, FieldValue, ValidationError, ValidationErrors,
};
pub use pipeline::{ErrorSink, FreshStore, Pipeline, Record, RecordStore};
