//! The expression node variants and their identity types.

use crate::value::Value;

/// Static-type identity attached to nodes, members, and methods.
///
/// The translators only ever need to distinguish the query-context type,
/// entity types (by name), scalar types (by EdgeQL tag), query-builder
/// typed values, and captured closure environments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    /// The mock query-context type whose members and methods are intrinsic
    /// translation forms.
    QueryContext,
    /// A schema entity type, identified by its registered name.
    Entity(String),
    /// A scalar type, identified by its EdgeQL tag (`str`, `int64`, ...).
    Scalar(String),
    /// A nested query-builder value.
    Builder,
    /// A closure-captured environment object.
    Captured,
}

impl TypeRef {
    pub fn entity(name: impl Into<String>) -> Self {
        TypeRef::Entity(name.into())
    }

    pub fn scalar(tag: impl Into<String>) -> Self {
        TypeRef::Scalar(tag.into())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TypeRef::Scalar(tag) if tag == "str")
    }

    /// The type's name as used in registry keys and error messages.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::QueryContext => "QueryContext",
            TypeRef::Entity(name) => name,
            TypeRef::Scalar(tag) => tag,
            TypeRef::Builder => "Builder",
            TypeRef::Captured => "Captured",
        }
    }
}

/// Identity of a member (field/property) access: the declaring type, the
/// host-side member name, and the member's static type.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberRef {
    pub declaring: TypeRef,
    pub name: String,
    pub ty: TypeRef,
}

impl MemberRef {
    pub fn new(declaring: TypeRef, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            declaring,
            name: name.into(),
            ty,
        }
    }
}

/// Identity of a method: declaring type, name, generic arguments, declared
/// parameter types, and return type.
///
/// The "equivalent operator" tag is not carried here; it lives in the
/// operator registry, keyed by `(declaring type name, method name)`.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodRef {
    pub declaring: TypeRef,
    pub name: String,
    pub generic_args: Vec<TypeRef>,
    pub param_types: Vec<TypeRef>,
    pub ty: TypeRef,
}

impl MethodRef {
    pub fn new(declaring: TypeRef, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            declaring,
            name: name.into(),
            generic_args: Vec::new(),
            param_types: Vec::new(),
            ty,
        }
    }

    pub fn with_generic_args(mut self, args: Vec<TypeRef>) -> Self {
        self.generic_args = args;
        self
    }

    pub fn with_param_types(mut self, params: Vec<TypeRef>) -> Self {
        self.param_types = params;
        self
    }
}

/// A typed expression tree node.
///
/// Immutable and owned by the caller for the duration of one translation.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Constant(Constant),
    Parameter(Parameter),
    MemberAccess(MemberAccess),
    MethodCall(MethodCall),
    Lambda(Lambda),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub value: Value,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberAccess {
    pub target: Box<Node>,
    pub member: MemberRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    /// Receiver for instance calls; `None` for static calls.
    pub target: Option<Box<Node>>,
    pub method: MethodRef,
    pub args: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    pub params: Vec<Parameter>,
    pub body: Box<Node>,
}

impl Node {
    pub fn constant(value: impl Into<Value>, ty: TypeRef) -> Node {
        Node::Constant(Constant {
            value: value.into(),
            ty,
        })
    }

    pub fn string(value: &str) -> Node {
        Node::constant(value, TypeRef::scalar("str"))
    }

    pub fn integer(value: i64) -> Node {
        Node::constant(value, TypeRef::scalar("int64"))
    }

    pub fn parameter(name: impl Into<String>, ty: TypeRef) -> Node {
        Node::Parameter(Parameter {
            name: name.into(),
            ty,
        })
    }

    pub fn member(target: Node, member: MemberRef) -> Node {
        Node::MemberAccess(MemberAccess {
            target: Box::new(target),
            member,
        })
    }

    /// A static method call.
    pub fn call(method: MethodRef, args: Vec<Node>) -> Node {
        Node::MethodCall(MethodCall {
            target: None,
            method,
            args,
        })
    }

    /// An instance method call on `target`.
    pub fn call_on(target: Node, method: MethodRef, args: Vec<Node>) -> Node {
        Node::MethodCall(MethodCall {
            target: Some(Box::new(target)),
            method,
            args,
        })
    }

    pub fn lambda(params: Vec<Parameter>, body: Node) -> Node {
        Node::Lambda(Lambda {
            params,
            body: Box::new(body),
        })
    }

    /// The node's static type. A lambda's type is its body's type.
    pub fn ty(&self) -> &TypeRef {
        match self {
            Node::Constant(c) => &c.ty,
            Node::Parameter(p) => &p.ty,
            Node::MemberAccess(m) => &m.member.ty,
            Node::MethodCall(c) => &c.method.ty,
            Node::Lambda(l) => l.body.ty(),
        }
    }

    /// Short description of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Constant(_) => "constant",
            Node::Parameter(_) => "parameter",
            Node::MemberAccess(_) => "member access",
            Node::MethodCall(_) => "method call",
            Node::Lambda(_) => "lambda",
        }
    }
}

/// Flatten a member-access chain into an ordered sequence from the
/// outermost expression (index 0, `node` itself) down to its ultimate root
/// (last index). The root is the first non-member-access node reached.
pub fn disassemble(node: &Node) -> Vec<&Node> {
    let mut chain = Vec::new();
    let mut current = node;
    loop {
        chain.push(current);
        match current {
            Node::MemberAccess(access) => current = &access.target,
            _ => break,
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> TypeRef {
        TypeRef::entity("Person")
    }

    #[test]
    fn disassemble_orders_outermost_to_root() {
        // x.friend.name
        let x = Node::parameter("x", person());
        let friend = Node::member(x, MemberRef::new(person(), "friend", person()));
        let name = Node::member(
            friend,
            MemberRef::new(person(), "name", TypeRef::scalar("str")),
        );

        let chain = disassemble(&name);
        assert_eq!(chain.len(), 3);
        match chain[0] {
            Node::MemberAccess(m) => assert_eq!(m.member.name, "name"),
            other => panic!("expected member access, found {}", other.kind()),
        }
        match chain[1] {
            Node::MemberAccess(m) => assert_eq!(m.member.name, "friend"),
            other => panic!("expected member access, found {}", other.kind()),
        }
        match chain[2] {
            Node::Parameter(p) => assert_eq!(p.name, "x"),
            other => panic!("expected parameter root, found {}", other.kind()),
        }
    }

    #[test]
    fn disassemble_of_non_member_is_the_node_itself() {
        let node = Node::string("abc");
        let chain = disassemble(&node);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0], &node);
    }

    #[test]
    fn lambda_type_is_body_type() {
        let body = Node::integer(1);
        let lambda = Node::lambda(
            vec![Parameter {
                name: "x".into(),
                ty: person(),
            }],
            body,
        );
        assert_eq!(lambda.ty(), &TypeRef::scalar("int64"));
    }

    #[test]
    fn type_ref_string_detection() {
        assert!(TypeRef::scalar("str").is_string());
        assert!(!TypeRef::scalar("int64").is_string());
        assert!(!person().is_string());
    }
}
