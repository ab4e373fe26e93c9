use std::sync::Arc;

use crate::subquery::SubQueryBuilder;

/// A runtime value flowing through constants, variables, and globals.
///
/// `Object` models a closure-captured composite whose named fields the
/// member translator dereferences step by step; `Builder` carries a nested
/// query builder handle evaluated eagerly by the sub-query forms; `Fragment`
/// is raw query text hoisted into the global table.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(CapturedObject),
    Fragment(String),
    Builder(Arc<dyn SubQueryBuilder>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Fragment(a), Value::Fragment(b)) => a == b,
            // Builders compare by instance identity.
            (Value::Builder(a), Value::Builder(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_for_value {
    ($variant:ident, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_value!(Integer, i8, i16, i32, i64);
impl_from_for_value!(Float, f32, f64);
impl_from_for_value!(Bool, bool);
impl_from_for_value!(String, String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<CapturedObject> for Value {
    fn from(v: CapturedObject) -> Self {
        Value::Object(v)
    }
}

impl From<Arc<dyn SubQueryBuilder>> for Value {
    fn from(v: Arc<dyn SubQueryBuilder>) -> Self {
        Value::Builder(v)
    }
}

impl Value {
    /// Short description of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Fragment(_) => "fragment",
            Value::Builder(_) => "builder",
        }
    }
}

/// A closure-captured composite value with named fields.
///
/// This stands in for the opaque host objects the original design reached
/// into with reflection: the member translator walks an access chain by
/// dereferencing one named field per step.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedObject {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl CapturedObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_pick_the_right_variant() {
        assert_eq!(Value::from(5i32), Value::Integer(5));
        assert_eq!(Value::from(2.5f64), Value::Float(2.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("abc"), Value::String("abc".to_string()));
    }

    #[test]
    fn captured_object_field_lookup() {
        let obj = CapturedObject::new("Env")
            .with_field("name", "Alice")
            .with_field("age", 30i64);

        assert_eq!(obj.field("name"), Some(&Value::String("Alice".into())));
        assert_eq!(obj.field("age"), Some(&Value::Integer(30)));
        assert_eq!(obj.field("missing"), None);
        assert_eq!(obj.type_name(), "Env");
    }

    #[test]
    fn nested_captured_objects() {
        let inner = CapturedObject::new("Inner").with_field("value", 7i64);
        let outer = CapturedObject::new("Outer").with_field("inner", inner);

        match outer.field("inner") {
            Some(Value::Object(o)) => assert_eq!(o.field("value"), Some(&Value::Integer(7))),
            other => panic!("expected nested object, found {other:?}"),
        }
    }
}
