//! The operator registry: methods tagged as equivalent to an EdgeQL
//! operator, and the well-known function table.
//!
//! Registration replaces the attribute-driven tagging of the original
//! design: hosts populate the registry at process start (or start from
//! [`OperatorRegistry::with_builtins`]) and the method translator consults
//! plain map lookups keyed by `(declaring type name, method name)`.

use eqlx_expr::{MethodRef, TypeRef};
use eqlx_result::{Error, Result};
use rustc_hash::FxHashMap;

/// Where an operator's symbol sits relative to its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Prefix,
    Infix,
    Postfix,
    Function,
}

/// A pure renderer from translated argument fragments to one output
/// fragment, with a declared placement and arity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqlOperator {
    pub symbol: &'static str,
    pub placement: Placement,
    /// Expected argument count; `None` for variadic function forms.
    pub arity: Option<usize>,
    /// True for the link mutation operators (`+=` / `-=`); dispatching one
    /// sets `has_initialization_operator` on the context.
    pub link_mutation: bool,
}

impl EqlOperator {
    pub const fn prefix(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: Placement::Prefix,
            arity: Some(1),
            link_mutation: false,
        }
    }

    pub const fn infix(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: Placement::Infix,
            arity: Some(2),
            link_mutation: false,
        }
    }

    pub const fn postfix(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: Placement::Postfix,
            arity: Some(1),
            link_mutation: false,
        }
    }

    pub const fn function(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: Placement::Function,
            arity: None,
            link_mutation: false,
        }
    }

    pub const fn link_mutation(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: Placement::Infix,
            arity: Some(2),
            link_mutation: true,
        }
    }

    /// Render the operator over already-translated argument fragments,
    /// preserving argument order.
    pub fn build(&self, args: &[String]) -> Result<String> {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(Error::InvariantViolation(format!(
                    "operator \"{}\" expects {} argument(s), received {}",
                    self.symbol,
                    arity,
                    args.len()
                )));
            }
        }
        Ok(match self.placement {
            Placement::Prefix => format!("{} {}", self.symbol, args[0]),
            Placement::Infix => format!("{} {} {}", args[0], self.symbol, args[1]),
            Placement::Postfix => format!("{} {}", args[0], self.symbol),
            Placement::Function => format!("{}({})", self.symbol, args.join(", ")),
        })
    }
}

type MethodKey = (String, String);

fn key_of(method: &MethodRef) -> MethodKey {
    (method.declaring.name().to_string(), method.name.clone())
}

/// Static tables mapping method identities to operator builders.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    operators: FxHashMap<MethodKey, EqlOperator>,
    functions: FxHashMap<MethodKey, EqlOperator>,
}

/// Declaring-type name for the host-side operator methods registered by
/// [`OperatorRegistry::with_builtins`].
pub const EDGEQL_DECLARING_TYPE: &str = "EdgeQL";

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the stock EdgeQL operator and function set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let eqlt = TypeRef::scalar(EDGEQL_DECLARING_TYPE);

        // Comparison.
        registry.register_operator(&eqlt, "equals", EqlOperator::infix("="));
        registry.register_operator(&eqlt, "not_equals", EqlOperator::infix("!="));
        registry.register_operator(&eqlt, "less_than", EqlOperator::infix("<"));
        registry.register_operator(&eqlt, "less_than_or_equal", EqlOperator::infix("<="));
        registry.register_operator(&eqlt, "greater_than", EqlOperator::infix(">"));
        registry.register_operator(&eqlt, "greater_than_or_equal", EqlOperator::infix(">="));

        // Boolean.
        registry.register_operator(&eqlt, "and", EqlOperator::infix("and"));
        registry.register_operator(&eqlt, "or", EqlOperator::infix("or"));
        registry.register_operator(&eqlt, "not", EqlOperator::prefix("not"));

        // Arithmetic.
        registry.register_operator(&eqlt, "add", EqlOperator::infix("+"));
        registry.register_operator(&eqlt, "subtract", EqlOperator::infix("-"));
        registry.register_operator(&eqlt, "multiply", EqlOperator::infix("*"));
        registry.register_operator(&eqlt, "divide", EqlOperator::infix("/"));
        registry.register_operator(&eqlt, "modulo", EqlOperator::infix("%"));

        // Strings and sets.
        registry.register_operator(&eqlt, "concat", EqlOperator::infix("++"));
        registry.register_operator(&eqlt, "like", EqlOperator::infix("like"));
        registry.register_operator(&eqlt, "ilike", EqlOperator::infix("ilike"));
        registry.register_operator(&eqlt, "in", EqlOperator::infix("in"));
        registry.register_operator(&eqlt, "not_in", EqlOperator::infix("not in"));
        registry.register_operator(&eqlt, "coalesce", EqlOperator::infix("??"));
        registry.register_operator(&eqlt, "exists", EqlOperator::prefix("exists"));
        registry.register_operator(&eqlt, "distinct", EqlOperator::prefix("distinct"));

        // Link mutation.
        registry.register_operator(&eqlt, "add_link", EqlOperator::link_mutation("+="));
        registry.register_operator(&eqlt, "remove_link", EqlOperator::link_mutation("-="));

        // Well-known functions, keyed by (declaring type name, method name).
        registry.register_function("str", "to_lower", EqlOperator::function("str_lower"));
        registry.register_function("str", "to_upper", EqlOperator::function("str_upper"));
        registry.register_function("str", "trim", EqlOperator::function("str_trim"));
        registry.register_function("str", "len", EqlOperator::function("len"));
        registry.register_function("str", "contains", EqlOperator::function("contains"));
        registry.register_function(EDGEQL_DECLARING_TYPE, "count", EqlOperator::function("count"));
        registry.register_function(EDGEQL_DECLARING_TYPE, "len", EqlOperator::function("len"));

        registry
    }

    /// Tag a method as equivalent to an EdgeQL operator.
    pub fn register_operator(&mut self, declaring: &TypeRef, method: &str, op: EqlOperator) {
        self.operators
            .insert((declaring.name().to_string(), method.to_string()), op);
    }

    /// Register a well-known function-call form.
    pub fn register_function(&mut self, declaring: &str, method: &str, op: EqlOperator) {
        self.functions
            .insert((declaring.to_string(), method.to_string()), op);
    }

    pub fn operator(&self, method: &MethodRef) -> Option<&EqlOperator> {
        self.operators.get(&key_of(method))
    }

    pub fn function(&self, method: &MethodRef) -> Option<&EqlOperator> {
        self.functions.get(&key_of(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn placements_render_in_argument_order() {
        assert_eq!(
            EqlOperator::infix("=").build(&strings(&["a", "b"])).unwrap(),
            "a = b"
        );
        assert_eq!(
            EqlOperator::prefix("not").build(&strings(&["a"])).unwrap(),
            "not a"
        );
        assert_eq!(
            EqlOperator::function("len")
                .build(&strings(&["a"]))
                .unwrap(),
            "len(a)"
        );
        assert_eq!(
            EqlOperator::function("contains")
                .build(&strings(&["a", "b"]))
                .unwrap(),
            "contains(a, b)"
        );
    }

    #[test]
    fn arity_mismatch_is_an_invariant_violation() {
        let err = EqlOperator::infix("=").build(&strings(&["a"])).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn builtin_lookup_by_method_identity() {
        let registry = OperatorRegistry::with_builtins();
        let eqlt = TypeRef::scalar(EDGEQL_DECLARING_TYPE);

        let equals = MethodRef::new(eqlt.clone(), "equals", TypeRef::scalar("bool"));
        let op = registry.operator(&equals).expect("equals is builtin");
        assert_eq!(op.symbol, "=");
        assert!(!op.link_mutation);

        let add_link = MethodRef::new(eqlt, "add_link", TypeRef::scalar("bool"));
        assert!(registry.operator(&add_link).unwrap().link_mutation);

        let to_lower = MethodRef::new(TypeRef::scalar("str"), "to_lower", TypeRef::scalar("str"));
        assert!(registry.operator(&to_lower).is_none());
        assert_eq!(registry.function(&to_lower).unwrap().symbol, "str_lower");
    }
}
