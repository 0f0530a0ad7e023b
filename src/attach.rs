//! Declaration attachment
//!
//! The configuration-time entry point: a [`Declarations`] set names the
//! fields of a record type and the rule kind (plus options) for each, and
//! [`attach`] compiles them in declaration order into a [`Pipeline`].
//! Any compile failure aborts the whole attachment; a half-attached pipeline
//! is never observable because registration only starts once every rule has
//! compiled.

use std::str::FromStr;

use tracing::debug;

use crate::catalog::RuleKind;
use crate::compiler::{compile, RuleOptions};
use crate::foundation::{DeclarationError, DeclarationResult};
use crate::pipeline::Pipeline;

/// One field's declaration: the rule kind to apply and its options.
#[derive(Debug, Clone)]
pub struct Declaration {
    field: String,
    kind: RuleKind,
    options: RuleOptions,
}

impl Declaration {
    /// Field this declaration covers.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Declared rule kind.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Declared options.
    #[must_use]
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }
}

/// An ordered set of field declarations.
///
/// Order is preserved through attachment: rules run in the order fields were
/// declared.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    entries: Vec<Declaration>,
}

impl Declarations {
    /// Creates an empty declaration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field with a rule kind and no options.
    #[must_use]
    pub fn field(self, name: impl Into<String>, kind: RuleKind) -> Self {
        self.field_with(name, kind, RuleOptions::new())
    }

    /// Declares a field with a rule kind and options.
    #[must_use]
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        kind: RuleKind,
        options: RuleOptions,
    ) -> Self {
        self.entries.push(Declaration {
            field: name.into(),
            kind,
            options,
        });
        self
    }

    /// Declares a field by rule-kind name, for declarations read from
    /// configuration rather than written in code.
    ///
    /// # Errors
    ///
    /// [`DeclarationError::UnknownRuleKind`] when the name is not in the
    /// catalog.
    pub fn field_named(
        self,
        name: impl Into<String>,
        kind: &str,
        options: RuleOptions,
    ) -> DeclarationResult<Self> {
        let kind = RuleKind::from_str(kind)?;
        Ok(self.field_with(name, kind, options))
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }
}

/// Compiles a declaration set and registers the rules on the pipeline.
///
/// All-or-nothing: every declaration is compiled before any rule is
/// registered, so a failing declaration leaves the pipeline untouched.
///
/// # Errors
///
/// [`DeclarationError::EmptyDeclaration`] for an empty set, and any compile
/// error from an individual declaration.
pub fn attach(pipeline: &mut Pipeline, declarations: &Declarations) -> DeclarationResult<()> {
    if declarations.is_empty() {
        return Err(DeclarationError::EmptyDeclaration);
    }

    let mut compiled = Vec::new();
    for declaration in declarations.iter() {
        compiled.push(compile(
            declaration.kind,
            &declaration.field,
            &declaration.options,
        )?);
    }

    for rule in compiled {
        debug!(field = rule.field(), kind = %rule.kind(), "attached rule");
        pipeline.register(rule);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
