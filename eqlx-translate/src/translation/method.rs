//! Method-call translation: query-context intrinsics, equivalent-operator
//! dispatch, and the well-known function table.

use eqlx_expr::{query_context, MethodCall, Node, TypeRef};
use eqlx_result::{Error, Result};

use super::ExpressionTranslator;
use crate::context::{Context, Scope};
use crate::subquery::{extract_builder, merge_globals, merge_parameters};

fn first_arg(call: &MethodCall) -> Result<&Node> {
    call.args.first().ok_or_else(|| {
        Error::InvariantViolation(format!(
            "intrinsic {} called without an argument",
            call.method.name
        ))
    })
}

impl ExpressionTranslator<'_> {
    /// Translate a method call, trying the query-context intrinsics first,
    /// then the equivalent-operator table, then the function table.
    pub(crate) fn translate_method_call(
        &self,
        call: &MethodCall,
        scope: &Scope,
        ctx: &mut Context,
    ) -> Result<String> {
        if call.method.declaring == TypeRef::QueryContext {
            return self.translate_context_method(call, scope, ctx);
        }

        if let Some(op) = self.registry.operator(&call.method) {
            let mut args = Vec::with_capacity(call.args.len());
            for (index, arg) in call.args.iter().enumerate() {
                // An argument declared as a builder type is an eager
                // sub-build; its text becomes an anonymous global reference
                // rather than being inlined.
                if call.method.param_types.get(index) == Some(&TypeRef::Builder) {
                    let built = extract_builder(arg)?.build_with_globals()?;
                    if !built.globals.is_empty() {
                        return Err(Error::SubQueryGlobalsNotSupported(call.method.name.clone()));
                    }
                    merge_parameters(ctx, &built);
                    let name = ctx.get_or_add_global(
                        None,
                        eqlx_expr::Value::Fragment(format!("({})", built.query)),
                    );
                    args.push(name);
                } else {
                    args.push(self.translate(arg, scope, ctx)?);
                }
            }

            ctx.has_initialization_operator = op.link_mutation;
            tracing::debug!(method = %call.method.name, operator = op.symbol, "dispatching equivalent operator");
            return op.build(&args);
        }

        if let Some(op) = self.registry.function(&call.method) {
            let mut args = Vec::with_capacity(call.args.len() + 1);
            if let Some(target) = &call.target {
                args.push(self.translate(target, scope, ctx)?);
            }
            for arg in &call.args {
                args.push(self.translate(arg, scope, ctx)?);
            }
            return op.build(&args);
        }

        Err(Error::UnsupportedMethod(format!(
            "{}.{}",
            call.method.declaring.name(),
            call.method.name
        )))
    }

    fn translate_context_method(
        &self,
        call: &MethodCall,
        scope: &Scope,
        ctx: &mut Context,
    ) -> Result<String> {
        match call.method.name.as_str() {
            // A mock reference to a declared global; resolved structurally,
            // never expanded.
            query_context::GLOBAL => {
                self.translate(first_arg(call)?, &scope.with_raw_strings(), ctx)
            }
            query_context::LOCAL => {
                let raw = self.translate(first_arg(call)?, &scope.with_raw_strings(), ctx)?;
                let mut parsed = Vec::new();
                for segment in raw.split('.') {
                    let property = scope
                        .local_scope
                        .as_ref()
                        .and_then(|ty| self.lookup_property(ty, segment))
                        .or_else(|| self.lookup_property(&scope.current_type, segment));
                    let Some(property) = property else {
                        return Err(Error::OutOfScope {
                            property: segment.to_string(),
                            path: raw,
                        });
                    };
                    parsed.push(property);
                }
                Ok(format!(".{}", parsed.join(".")))
            }
            // Same as local, without validation.
            query_context::UNSAFE_LOCAL => Ok(format!(
                ".{}",
                self.translate(first_arg(call)?, &scope.with_raw_strings(), ctx)?
            )),
            // Scalar inclusion marker; produces no text.
            query_context::INCLUDE => Ok(String::new()),
            query_context::INCLUDE_LINK | query_context::INCLUDE_MULTI_LINK => {
                let shape = self.translate(first_arg(call)?, scope, ctx)?;
                ctx.is_shape = true;
                Ok(shape)
            }
            // Escape hatch: inject the argument verbatim.
            query_context::RAW => self.translate(first_arg(call)?, &scope.with_raw_strings(), ctx),
            query_context::BACK_LINK => self.translate_back_link(call, scope, ctx),
            query_context::SUB_QUERY => {
                let built = extract_builder(first_arg(call)?)?.build_with_globals()?;
                tracing::debug!(
                    parameters = built.parameters.len(),
                    globals = built.globals.len(),
                    "merging sub-query build"
                );
                merge_parameters(ctx, &built);
                merge_globals(ctx, &built);
                Ok(format!("({})", built.query))
            }
            other => Err(Error::UnsupportedMethod(format!("QueryContext.{other}"))),
        }
    }

    /// `.<link[is Type]{ shape }` — the type filter applies only to the
    /// lambda form, and the shape suffix only when a second argument is
    /// present.
    fn translate_back_link(
        &self,
        call: &MethodCall,
        scope: &Scope,
        ctx: &mut Context,
    ) -> Result<String> {
        let selector = first_arg(call)?;
        let is_raw_name = selector.ty().is_string();
        let has_shape = !is_raw_name && call.args.len() > 1;

        let property = if is_raw_name {
            self.translate(selector, &scope.with_raw_strings(), ctx)?
        } else {
            self.translate(selector, &scope.without_self_reference(), ctx)?
        };

        let mut backlink = format!(".<{property}");

        if !is_raw_name {
            let target = call.method.generic_args.first().ok_or_else(|| {
                Error::InvariantViolation(
                    "back_link lambda form registered without a target type".to_string(),
                )
            })?;
            backlink.push_str(&format!("[is {}]", self.schema.type_name(target.name())));
        }

        if has_shape {
            let shape = self.translate(&call.args[1], scope, ctx)?;
            backlink.push_str(&format!("{{ {shape} }}"));
        }

        Ok(backlink)
    }

    /// Resolve one `local()` path segment against an entity type, returning
    /// its domain name when the property is registered.
    fn lookup_property(&self, ty: &TypeRef, segment: &str) -> Option<String> {
        let TypeRef::Entity(entity) = ty else {
            return None;
        };
        self.schema.property(entity, segment)?;
        Some(self.schema.field_name(ty, segment))
    }
}
