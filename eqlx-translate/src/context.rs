//! Per-build translation state.
//!
//! State is split along ownership lines: [`Scope`] holds the flags that are
//! overridden for the duration of one sub-expression (a cheap clone on
//! every "enter", so a derived scope can never leak into its parent), and
//! [`Context`] holds the append-only parameter/global tables plus the signal
//! flags the surrounding shape logic reads back.

use eqlx_expr::{BuiltQuery, Global, TypeRef, Value};
use eqlx_schema::{scalar_of, ScalarKind};

/// Flags and type information scoped to the sub-expression currently being
/// translated. Derive an override with the `with_*`/`without_*`
/// constructors; the parent scope is never mutated.
#[derive(Clone, Debug)]
pub struct Scope {
    /// Render string constants as quoted literals. Suppressed inside
    /// `raw()`, `local()`, and the string forms of `back_link()`.
    pub quote_strings: bool,
    /// Emit the leading self-reference (`.`) / parameter prefix when
    /// rendering entity paths and bare parameters.
    pub include_self_reference: bool,
    /// The entity type the expression is translated against.
    pub current_type: TypeRef,
    /// Type that `local()` paths are validated against first.
    pub local_scope: Option<TypeRef>,
}

impl Scope {
    pub fn new(current_type: TypeRef) -> Self {
        Self {
            quote_strings: true,
            include_self_reference: true,
            current_type,
            local_scope: None,
        }
    }

    pub fn with_raw_strings(&self) -> Self {
        Self {
            quote_strings: false,
            ..self.clone()
        }
    }

    pub fn without_self_reference(&self) -> Self {
        Self {
            include_self_reference: false,
            ..self.clone()
        }
    }

    pub fn with_local_scope(&self, local_scope: TypeRef) -> Self {
        Self {
            local_scope: Some(local_scope),
            ..self.clone()
        }
    }

    pub fn with_current_type(&self, current_type: TypeRef) -> Self {
        Self {
            current_type,
            ..self.clone()
        }
    }
}

/// One captured host value bound to a generated name and, when one exists,
/// its scalar type tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
    pub scalar: Option<ScalarKind>,
}

/// Mutable per-build state: the ordered variable and global tables plus the
/// signal flags consumed by the surrounding shape-building logic.
///
/// Both tables are append-only during a build; nothing is removed mid-build.
/// A failed translation leaves the context partially populated but
/// consistent, and the caller must discard it.
#[derive(Clone, Debug, Default)]
pub struct Context {
    variables: Vec<Variable>,
    globals: Vec<Global>,
    next_variable: usize,
    next_global: usize,
    /// Set when a translated fragment is a relation shape rather than a
    /// scalar expression (`include_link` / `include_multi_link`).
    pub is_shape: bool,
    /// Set when the last dispatched operator was a link mutation (`+=` /
    /// `-=`).
    pub has_initialization_operator: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a captured value under the next sequential name and return
    /// that name. Registrations are never deduplicated by value: the same
    /// value registered twice yields two distinct entries.
    pub fn add_variable(&mut self, value: Value) -> String {
        let name = format!("p{}", self.next_variable);
        self.next_variable += 1;
        let scalar = scalar_of(&value);
        self.variables.push(Variable {
            name: name.clone(),
            value,
            scalar,
        });
        name
    }

    /// Insert a variable under an explicit name (the sub-build merge path).
    ///
    /// A name already present is overwritten silently, keeping its position.
    /// Hosts that reuse parameter names across sub-builds will lose the
    /// earlier value; see DESIGN.md.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        let scalar = scalar_of(&value);
        if let Some(existing) = self.variables.iter_mut().find(|v| v.name == name) {
            existing.value = value;
            existing.scalar = scalar;
        } else {
            self.variables.push(Variable {
                name: name.to_string(),
                value,
                scalar,
            });
        }
    }

    /// Insert a global under an explicit name, with the same silent
    /// overwrite-on-collision rule as [`set_variable`](Self::set_variable).
    pub fn set_global(&mut self, name: &str, value: Value, is_reference: bool) {
        if let Some(existing) = self.globals.iter_mut().find(|g| g.name == name) {
            existing.value = value;
            existing.is_reference = is_reference;
        } else {
            self.globals.push(Global::new(name, value, is_reference));
        }
    }

    /// Register a global, deduplicating by value: if an equal value is
    /// already present its name is returned instead. Passing `None`
    /// auto-assigns the next anonymous name.
    pub fn get_or_add_global(&mut self, name: Option<&str>, value: Value) -> String {
        if let Some(existing) = self.globals.iter().find(|g| g.value == value) {
            return existing.name.clone();
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let generated = format!("__global_{}", self.next_global);
                self.next_global += 1;
                generated
            }
        };
        self.globals.push(Global::new(name.clone(), value, false));
        name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn globals(&self) -> &[Global] {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Option<&Global> {
        self.globals.iter().find(|g| g.name == name)
    }

    /// Drain the context into the output triple handed to the query
    /// surface, preserving insertion order.
    pub fn into_built(self, query: impl Into<String>) -> BuiltQuery {
        BuiltQuery {
            query: query.into(),
            parameters: self
                .variables
                .into_iter()
                .map(|v| (v.name, v.value))
                .collect(),
            globals: self.globals,
        }
    }
}
