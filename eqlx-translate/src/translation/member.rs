//! Member-access translation: contextual variable references, captured
//! closure values, and entity paths.

use eqlx_expr::{disassemble, query_context, MemberAccess, Node, TypeRef, Value};
use eqlx_result::{Error, Result};
use eqlx_schema::scalar_of;

use super::ExpressionTranslator;
use crate::context::{Context, Scope};

impl ExpressionTranslator<'_> {
    /// Translate a member-access chain.
    ///
    /// The chain is flattened outermost-to-root and classified by its root:
    /// a query-context root is a pre-declared variable reference, a constant
    /// root is a captured closure value registered as a new parameter, and
    /// anything else renders as a dot-separated entity path.
    pub(crate) fn translate_member(
        &self,
        node: &Node,
        access: &MemberAccess,
        scope: &Scope,
        ctx: &mut Context,
    ) -> Result<String> {
        let chain = disassemble(node);
        let root = *chain.last().expect("chain contains at least the node itself");

        // Context-intrinsic access: ctx.variables.<name>.
        if root.ty() == &TypeRef::QueryContext && chain.len() >= 2 {
            let accessor = chain[chain.len() - 2];
            let Node::MemberAccess(accessor) = accessor else {
                return Err(Error::UnsupportedExpression(format!(
                    "cannot use a {} for a contextual member access",
                    accessor.kind()
                )));
            };
            if accessor.member.name == query_context::VARIABLES {
                if chain.len() < 3 {
                    return Err(Error::UnsupportedExpression(
                        "contextual variable access names no variable".to_string(),
                    ));
                }
                let target = chain[chain.len() - 3];
                let Node::MemberAccess(target) = target else {
                    return Err(Error::UnsupportedExpression(format!(
                        "cannot use a {} as a variable access",
                        target.kind()
                    )));
                };
                if chain.len() != 3 {
                    return Err(Error::UnsupportedNesting(access.member.name.clone()));
                }
                // The leaf member names a pre-declared variable.
                return Ok(target.member.name.clone());
            }
        }

        // Captured-value access: the root is a closure-captured constant.
        // Walk the chain towards the leaf, dereferencing one named field per
        // step, and register the resolved value as a new variable.
        if let Node::Constant(constant) = root {
            let mut value = &constant.value;
            for link in chain[..chain.len() - 1].iter().rev() {
                let Node::MemberAccess(step) = *link else {
                    return Err(Error::InvariantViolation(format!(
                        "member tree contains a {}, expected only members",
                        link.kind()
                    )));
                };
                value = match value {
                    Value::Object(object) => {
                        object.field(&step.member.name).ok_or_else(|| {
                            Error::InvariantViolation(format!(
                                "captured {} has no member \"{}\"",
                                object.type_name(),
                                step.member.name
                            ))
                        })?
                    }
                    other => {
                        return Err(Error::InvariantViolation(format!(
                            "cannot dereference \"{}\" through a {} value",
                            step.member.name,
                            other.kind()
                        )));
                    }
                };
            }

            let value = value.clone();
            let name = ctx.add_variable(value.clone());
            let Some(scalar) = scalar_of(&value) else {
                return Err(Error::UnsupportedType(format!(
                    "the captured value of \"{}\"",
                    access.member.name
                )));
            };
            return Ok(format!("<{scalar}>${name}"));
        }

        // Entity-path access.
        let include_parameter = !matches!(access.target.as_ref(), Node::Parameter(_));
        Ok(self.render_member_path(access, include_parameter, scope.include_self_reference))
    }

    /// Render an access chain as a dot-separated path of domain names.
    ///
    /// The bound parameter's name is emitted as a prefix only when the
    /// access is further chained; a bare single access renders with a
    /// leading self-reference (`.name`) unless suppressed by the scope.
    fn render_member_path(
        &self,
        access: &MemberAccess,
        include_parameter: bool,
        include_self_reference: bool,
    ) -> String {
        let mut tree = vec![self
            .schema
            .field_name(&access.member.declaring, &access.member.name)];

        match access.target.as_ref() {
            Node::MemberAccess(inner) => tree.push(self.render_member_path(inner, true, true)),
            Node::Parameter(param) => {
                if include_self_reference {
                    tree.push(if include_parameter {
                        param.name.clone()
                    } else {
                        String::new()
                    });
                }
            }
            _ => {}
        }

        tree.reverse();
        tree.join(".")
    }
}
