//! Expression-to-EdgeQL translation core.
//!
//! Callers hand the engine a typed expression tree ([`eqlx_expr::Node`]) and
//! a mutable [`Context`]; the engine compiles the tree into an EdgeQL text
//! fragment while registering captured values and hoisted sub-queries in the
//! context's parameter and global tables. The fluent query surface composes
//! fragments from separate translation calls against one shared context into
//! a final program, then drains the context with [`Context::into_built`].
//!
//! Translation is single-threaded, synchronous, and purely recursive. A
//! context is exclusively owned by one top-level build; the registries are
//! read-only, so independent builds may run concurrently.
//!
//! ```
//! use eqlx_expr::{MemberRef, Node, TypeRef};
//! use eqlx_schema::{EntityMetadata, NamingStrategy, PropertyMetadata, ScalarKind, SchemaRegistry};
//! use eqlx_translate::{Context, ExpressionTranslator, OperatorRegistry, Scope};
//!
//! let mut schema = SchemaRegistry::with_naming(NamingStrategy::SnakeCase);
//! schema.register(
//!     EntityMetadata::new("Person")
//!         .with_property(PropertyMetadata::scalar("Name", ScalarKind::Str)),
//! );
//! let registry = OperatorRegistry::with_builtins();
//! let translator = ExpressionTranslator::new(&registry, &schema);
//!
//! let person = TypeRef::entity("Person");
//! let access = Node::member(
//!     Node::parameter("x", person.clone()),
//!     MemberRef::new(person.clone(), "Name", TypeRef::scalar("str")),
//! );
//!
//! let mut ctx = Context::new();
//! let fragment = translator
//!     .translate(&access, &Scope::new(person), &mut ctx)
//!     .unwrap();
//! assert_eq!(fragment, ".name");
//! ```

pub mod context;
pub mod operators;
pub mod subquery;
pub mod translation;

pub use context::{Context, Scope, Variable};
pub use operators::{EqlOperator, OperatorRegistry, Placement};
pub use subquery::FragmentBuilder;
pub use translation::ExpressionTranslator;

use eqlx_expr::Node;
use eqlx_result::Result;
use eqlx_schema::SchemaRegistry;

/// Translate a single expression against an externally-supplied context.
///
/// Convenience wrapper over [`ExpressionTranslator::translate`] for hosts
/// that do not keep a translator value around.
pub fn translate_expression(
    node: &Node,
    scope: &Scope,
    ctx: &mut Context,
    registry: &OperatorRegistry,
    schema: &SchemaRegistry,
) -> Result<String> {
    ExpressionTranslator::new(registry, schema).translate(node, scope, ctx)
}
