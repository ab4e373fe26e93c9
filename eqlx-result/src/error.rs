use thiserror::Error;

/// Unified error type for eqlx translation.
///
/// All failures are synchronous and non-recoverable within a single build:
/// the translation is abandoned and the error propagates to the caller via
/// `?`. A failed build leaves its context partially populated but still
/// consistent (the tables are append-only); callers must discard it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An expression node has no translator for the position it appears in,
    /// e.g. a non-member node inside a contextual access chain.
    #[error("no translator for {0} expression")]
    UnsupportedExpression(String),

    /// A context-intrinsic variable access chain is deeper than the fixed
    /// three-element `ctx.variables.<name>` shape.
    #[error("cannot use nested values for variable access: {0}")]
    UnsupportedNesting(String),

    /// A value or expression type has no EdgeQL scalar equivalent.
    #[error("cannot use {0} as no EdgeQL equivalent can be found")]
    UnsupportedType(String),

    /// A `local()` path segment does not resolve against the local scope
    /// type or the current entity type.
    #[error("the property \"{property}\" within \"{path}\" is out of scope")]
    OutOfScope { property: String, path: String },

    /// A method call matches no intrinsic form, operator tag, or
    /// function-table entry.
    #[error("no translator found for method {0}")]
    UnsupportedMethod(String),

    /// An argument-position sub-query produced globals, which is only
    /// allowed in the top-level `sub_query()` form.
    #[error("cannot use queries with globals within a sub-query argument: {0}")]
    SubQueryGlobalsNotSupported(String),

    /// A structural invariant of the translator was broken. This indicates
    /// a bug in eqlx or in a registered operator, not a user error.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
