//! One translator per expression-node kind, dispatched by an exhaustive
//! match over the closed [`Node`] union.
//!
//! Translators are pure with respect to everything except the shared
//! [`Context`]: they recursively invoke the dispatcher on child nodes and
//! register variables/globals as a side effect. The member-access and
//! method-call translators live in their own modules; they are the
//! algorithmic heart of the engine.

mod member;
mod method;

use eqlx_expr::{Constant, Lambda, Node, Parameter, TypeRef, Value};
use eqlx_result::{Error, Result};
use eqlx_schema::SchemaRegistry;

use crate::context::{Context, Scope};
use crate::operators::OperatorRegistry;

/// The translation engine: read-only registries plus the node translators.
///
/// One value can serve many translations, including concurrent ones; all
/// per-build state lives in the caller's [`Context`].
pub struct ExpressionTranslator<'a> {
    pub(crate) registry: &'a OperatorRegistry,
    pub(crate) schema: &'a SchemaRegistry,
}

impl<'a> ExpressionTranslator<'a> {
    pub fn new(registry: &'a OperatorRegistry, schema: &'a SchemaRegistry) -> Self {
        Self { registry, schema }
    }

    /// Translate one expression node into an EdgeQL fragment, registering
    /// captured values and hoisted sub-queries in `ctx` along the way.
    pub fn translate(&self, node: &Node, scope: &Scope, ctx: &mut Context) -> Result<String> {
        match node {
            Node::Constant(constant) => translate_constant(constant, scope),
            Node::Parameter(parameter) => Ok(translate_parameter(parameter, scope)),
            Node::MemberAccess(access) => self.translate_member(node, access, scope, ctx),
            Node::MethodCall(call) => self.translate_method_call(call, scope, ctx),
            Node::Lambda(lambda) => self.translate_lambda(lambda, scope, ctx),
        }
    }

    /// A lambda translates as its body. When the lambda binds an
    /// entity-typed parameter, the body is translated against that entity.
    fn translate_lambda(&self, lambda: &Lambda, scope: &Scope, ctx: &mut Context) -> Result<String> {
        let entity_param = lambda
            .params
            .iter()
            .find(|p| matches!(p.ty, TypeRef::Entity(_)));
        match entity_param {
            Some(param) => {
                let scope = scope.with_current_type(param.ty.clone());
                self.translate(&lambda.body, &scope, ctx)
            }
            None => self.translate(&lambda.body, scope, ctx),
        }
    }
}

/// Constants render as literal EdgeQL syntax, honoring the scope's string
/// quoting flag.
fn translate_constant(constant: &Constant, scope: &Scope) -> Result<String> {
    render_literal(&constant.value, scope.quote_strings)
}

/// A bare parameter renders as its bound name, subject to the same
/// self-reference flag the member translator applies to chain roots.
fn translate_parameter(parameter: &Parameter, scope: &Scope) -> String {
    if scope.include_self_reference {
        parameter.name.clone()
    } else {
        String::new()
    }
}

fn render_literal(value: &Value, quote_strings: bool) -> Result<String> {
    match value {
        Value::Null => Ok("{}".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::String(s) => Ok(if quote_strings {
            quote_string(s)
        } else {
            s.clone()
        }),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| render_literal(item, quote_strings))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        Value::Object(_) | Value::Fragment(_) | Value::Builder(_) => Err(Error::UnsupportedType(
            format!("a {} constant", value.kind()),
        )),
    }
}

fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
