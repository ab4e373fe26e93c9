//! Typed expression tree consumed by the eqlx translation engine.
//!
//! The tree is a closed tagged union ([`Node`]) of the five expression kinds
//! the translators understand: constants, parameters, member accesses,
//! method calls, and lambdas. Member and method identities carry their
//! declaring type explicitly ([`MemberRef`], [`MethodRef`]) instead of being
//! resolved through runtime reflection, so registry and naming lookups are
//! plain map reads.

pub mod expr;
pub use expr::*;

// Note: for API simplicity these are also exported out of their modules.
pub mod query_context;
pub mod subquery;
pub mod value;

pub use subquery::{BuiltQuery, Global, SubQueryBuilder};
pub use value::{CapturedObject, Value};
