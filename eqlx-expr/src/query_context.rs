//! Identities for the mock query-context surface.
//!
//! The query-context type exists only inside expression trees: its member
//! and method accesses are intrinsic translation forms, never calls into
//! real code. This module centralizes the names the translators switch on
//! and provides constructors for the corresponding [`MethodRef`]s.

use crate::expr::{MethodRef, TypeRef};

/// Member granting access to pre-declared query variables
/// (`ctx.variables.<name>`).
pub const VARIABLES: &str = "variables";

pub const GLOBAL: &str = "global";
pub const LOCAL: &str = "local";
pub const UNSAFE_LOCAL: &str = "unsafe_local";
pub const INCLUDE: &str = "include";
pub const INCLUDE_LINK: &str = "include_link";
pub const INCLUDE_MULTI_LINK: &str = "include_multi_link";
pub const RAW: &str = "raw";
pub const BACK_LINK: &str = "back_link";
pub const SUB_QUERY: &str = "sub_query";

fn intrinsic(name: &str, ty: TypeRef) -> MethodRef {
    MethodRef::new(TypeRef::QueryContext, name, ty)
}

/// `ctx.global::<T>(name)` — a mock reference to a declared query global.
pub fn global(ty: TypeRef) -> MethodRef {
    intrinsic(GLOBAL, ty)
}

/// `ctx.local::<T>(path)` — a contextual local, validated against the local
/// scope type and the current entity type.
pub fn local(ty: TypeRef) -> MethodRef {
    intrinsic(LOCAL, ty)
}

/// `ctx.unsafe_local::<T>(path)` — as [`local`], without validation.
pub fn unsafe_local(ty: TypeRef) -> MethodRef {
    intrinsic(UNSAFE_LOCAL, ty)
}

/// `ctx.include::<T>()` — scalar-field inclusion marker within a shape.
pub fn include(ty: TypeRef) -> MethodRef {
    intrinsic(INCLUDE, ty)
}

/// `ctx.include_link(shape)` — single-link inclusion with a nested shape.
pub fn include_link(ty: TypeRef) -> MethodRef {
    intrinsic(INCLUDE_LINK, ty)
}

/// `ctx.include_multi_link(shape)` — multi-link inclusion with a nested
/// shape.
pub fn include_multi_link(ty: TypeRef) -> MethodRef {
    intrinsic(INCLUDE_MULTI_LINK, ty)
}

/// `ctx.raw::<T>(text)` — escape hatch injecting raw query text verbatim.
pub fn raw(ty: TypeRef) -> MethodRef {
    intrinsic(RAW, ty)
}

/// `ctx.back_link(name)` — reverse-link traversal named by a raw string.
pub fn back_link_raw(ty: TypeRef) -> MethodRef {
    intrinsic(BACK_LINK, ty)
}

/// `ctx.back_link::<Target>(path[, shape])` — reverse-link traversal with a
/// type filter derived from the generic target type.
pub fn back_link(target: TypeRef, ty: TypeRef) -> MethodRef {
    intrinsic(BACK_LINK, ty).with_generic_args(vec![target])
}

/// `ctx.sub_query(builder)` — eagerly evaluated nested query.
pub fn sub_query(ty: TypeRef) -> MethodRef {
    intrinsic(SUB_QUERY, ty)
}
