//! The sub-build bridge: evaluating nested builders and merging their
//! tables into the enclosing context.

use eqlx_expr::{BuiltQuery, Node, SubQueryBuilder, Value};
use eqlx_result::{Error, Result};

use crate::context::Context;

/// Merge a nested build's parameters into the enclosing context, preserving
/// insertion order. Names already present are overwritten silently.
pub fn merge_parameters(ctx: &mut Context, built: &BuiltQuery) {
    for (name, value) in &built.parameters {
        ctx.set_variable(name, value.clone());
    }
}

/// Merge a nested build's globals into the enclosing context, preserving
/// insertion order. Names already present are overwritten silently.
pub fn merge_globals(ctx: &mut Context, built: &BuiltQuery) {
    for global in &built.globals {
        ctx.set_global(&global.name, global.value.clone(), global.is_reference);
    }
}

/// Pull the builder handle out of a node. The sub-query forms require the
/// builder to be bound into the tree as a [`Value::Builder`] constant.
pub(crate) fn extract_builder(node: &Node) -> Result<&dyn SubQueryBuilder> {
    match node {
        Node::Constant(constant) => match &constant.value {
            Value::Builder(builder) => Ok(builder.as_ref()),
            other => Err(Error::UnsupportedExpression(format!(
                "expected a query builder constant, found a {} constant",
                other.kind()
            ))),
        },
        other => Err(Error::UnsupportedExpression(format!(
            "expected a query builder constant, found a {}",
            other.kind()
        ))),
    }
}

/// The simplest [`SubQueryBuilder`]: fixed query text plus pre-bound
/// parameter and global tables. Hosts with a full fluent surface implement
/// the trait on their own builder types; this one also backs the tests.
#[derive(Clone, Debug, Default)]
pub struct FragmentBuilder {
    query: String,
    parameters: Vec<(String, Value)>,
    globals: Vec<eqlx_expr::Global>,
}

impl FragmentBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
            globals: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn with_global(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        is_reference: bool,
    ) -> Self {
        self.globals
            .push(eqlx_expr::Global::new(name, value, is_reference));
        self
    }
}

impl SubQueryBuilder for FragmentBuilder {
    fn build_with_globals(&self) -> Result<BuiltQuery> {
        Ok(BuiltQuery {
            query: self.query.clone(),
            parameters: self.parameters.clone(),
            globals: self.globals.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_order_and_overwrites_on_collision() {
        let mut ctx = Context::new();
        ctx.set_variable("p1", Value::from(1i64));

        let built = BuiltQuery {
            query: "select Person".into(),
            parameters: vec![
                ("p1".to_string(), Value::from(5i64)),
                ("p2".to_string(), Value::from("x")),
            ],
            globals: vec![eqlx_expr::Global::new("g", Value::from(true), false)],
        };

        merge_parameters(&mut ctx, &built);
        merge_globals(&mut ctx, &built);

        let names: Vec<&str> = ctx.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["p1", "p2"]);
        assert_eq!(ctx.variable("p1").unwrap().value, Value::from(5i64));
        assert_eq!(ctx.globals().len(), 1);
    }

    #[test]
    fn extract_builder_rejects_non_builder_nodes() {
        let err = extract_builder(&Node::string("abc")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedExpression(_)));
    }
}
