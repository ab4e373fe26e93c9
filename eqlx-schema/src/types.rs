use std::fmt;

use eqlx_expr::Value;

/// An EdgeQL scalar type tag, rendered into typed parameter placeholders
/// (`<str>$p0`) by the member translator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int64,
    Float64,
    Str,
    Array(Box<ScalarKind>),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Bool => write!(f, "bool"),
            ScalarKind::Int64 => write!(f, "int64"),
            ScalarKind::Float64 => write!(f, "float64"),
            ScalarKind::Str => write!(f, "str"),
            ScalarKind::Array(inner) => write!(f, "array<{inner}>"),
        }
    }
}

/// Map a runtime value to its EdgeQL scalar tag, or `None` when the value
/// has no scalar equivalent (objects, builders, fragments, nulls, and
/// arrays whose element type cannot be inferred).
pub fn scalar_of(value: &Value) -> Option<ScalarKind> {
    match value {
        Value::Bool(_) => Some(ScalarKind::Bool),
        Value::Integer(_) => Some(ScalarKind::Int64),
        Value::Float(_) => Some(ScalarKind::Float64),
        Value::String(_) => Some(ScalarKind::Str),
        Value::Array(items) => {
            let element = scalar_of(items.first()?)?;
            Some(ScalarKind::Array(Box::new(element)))
        }
        Value::Null | Value::Object(_) | Value::Fragment(_) | Value::Builder(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqlx_expr::CapturedObject;

    #[test]
    fn scalar_tags_render_edgeql_names() {
        assert_eq!(ScalarKind::Str.to_string(), "str");
        assert_eq!(ScalarKind::Int64.to_string(), "int64");
        assert_eq!(
            ScalarKind::Array(Box::new(ScalarKind::Float64)).to_string(),
            "array<float64>"
        );
    }

    #[test]
    fn scalar_of_maps_supported_values() {
        assert_eq!(scalar_of(&Value::from("a")), Some(ScalarKind::Str));
        assert_eq!(scalar_of(&Value::from(1i64)), Some(ScalarKind::Int64));
        assert_eq!(scalar_of(&Value::from(1.5f64)), Some(ScalarKind::Float64));
        assert_eq!(scalar_of(&Value::from(true)), Some(ScalarKind::Bool));
        assert_eq!(
            scalar_of(&Value::Array(vec![Value::from("a"), Value::from("b")])),
            Some(ScalarKind::Array(Box::new(ScalarKind::Str)))
        );
    }

    #[test]
    fn scalar_of_rejects_unmappable_values() {
        assert_eq!(scalar_of(&Value::Null), None);
        assert_eq!(scalar_of(&Value::Object(CapturedObject::new("Env"))), None);
        assert_eq!(scalar_of(&Value::Array(vec![])), None);
    }
}
