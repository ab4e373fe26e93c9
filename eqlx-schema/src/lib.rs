//! Statically-registered entity metadata for the eqlx translation engine.
//!
//! This crate replaces the runtime reflection the original design leaned on:
//! instead of live member introspection and attribute lookups, hosts register
//! entity metadata once at process start (typically from a code-generation
//! step) and the translators consult plain map lookups — domain names via
//! [`SchemaRegistry::field_name`], `local()` path validation via
//! [`SchemaRegistry::property`], and the value-to-scalar mapping via
//! [`scalar_of`].

mod naming;
mod registry;
mod types;

pub use naming::NamingStrategy;
pub use registry::{EntityMetadata, PropertyMetadata, SchemaRegistry};
pub use types::{scalar_of, ScalarKind};
