//! Handles that let expression trees embed eagerly-buildable sub-queries.

use eqlx_result::Result;

use crate::value::Value;

/// A named value hoisted out of an expression tree into a side table and
/// referenced by name within the query text.
///
/// Anonymous globals (injected sub-query fragments) are auto-named at
/// registration; the stored name is the one embedded in the fragment text.
#[derive(Clone, Debug, PartialEq)]
pub struct Global {
    pub name: String,
    pub value: Value,
    pub is_reference: bool,
}

impl Global {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, is_reference: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_reference,
        }
    }
}

/// The result of a completed build: the query text plus the out-of-band
/// parameter and global tables, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuiltQuery {
    pub query: String,
    pub parameters: Vec<(String, Value)>,
    pub globals: Vec<Global>,
}

/// A nested query builder that can be evaluated eagerly during translation.
///
/// This is the explicit typed callback that replaces the original design's
/// dynamically-compiled builder lambdas: the host binds the builder into the
/// tree as a [`Value::Builder`] constant, and the sub-query forms call
/// [`build_with_globals`](SubQueryBuilder::build_with_globals) when the
/// enclosing expression is translated. The call is synchronous, in-process,
/// and trusted local computation.
pub trait SubQueryBuilder: std::fmt::Debug + Send + Sync {
    fn build_with_globals(&self) -> Result<BuiltQuery>;
}
