use eqlx_expr::TypeRef;
use rustc_hash::FxHashMap;

use crate::naming::NamingStrategy;
use crate::types::ScalarKind;

/// Metadata for one property (scalar field or link) of an entity type.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMetadata {
    name: String,
    domain_name: Option<String>,
    scalar: Option<ScalarKind>,
    link: Option<String>,
}

impl PropertyMetadata {
    /// A scalar property.
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            domain_name: None,
            scalar: Some(kind),
            link: None,
        }
    }

    /// A link to another entity type.
    pub fn link(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain_name: None,
            scalar: None,
            link: Some(target.into()),
        }
    }

    /// Override the domain-level name instead of deriving it from the
    /// registry's naming strategy.
    pub fn named(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn scalar_kind(&self) -> Option<&ScalarKind> {
        self.scalar.as_ref()
    }

    pub fn link_target(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// Metadata for one entity type: its host name, optional domain name, and
/// registered properties.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityMetadata {
    name: String,
    domain_name: Option<String>,
    properties: Vec<PropertyMetadata>,
}

impl EntityMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain_name: None,
            properties: Vec::new(),
        }
    }

    pub fn named(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// The registered entity metadata consulted by the translators.
///
/// Built once at process start; lookups are read-only afterwards, so a
/// shared reference can serve concurrent translations.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    entities: FxHashMap<String, EntityMetadata>,
    naming: NamingStrategy,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming(naming: NamingStrategy) -> Self {
        Self {
            entities: FxHashMap::default(),
            naming,
        }
    }

    pub fn register(&mut self, entity: EntityMetadata) {
        self.entities.insert(entity.name.clone(), entity);
    }

    pub fn entity(&self, name: &str) -> Option<&EntityMetadata> {
        self.entities.get(name)
    }

    /// Look up a property of an entity type, for `local()` path validation.
    pub fn property(&self, entity: &str, member: &str) -> Option<&PropertyMetadata> {
        self.entity(entity)?.property(member)
    }

    /// The domain-level name of a member access: the registered domain name
    /// when one exists, otherwise the naming strategy applied to the host
    /// name. Consulted once per member access; results are never cached.
    pub fn field_name(&self, declaring: &TypeRef, member: &str) -> String {
        if let TypeRef::Entity(entity) = declaring {
            if let Some(domain) = self
                .property(entity, member)
                .and_then(PropertyMetadata::domain_name)
            {
                return domain.to_string();
            }
        }
        self.naming.apply(member)
    }

    /// The domain-level name of an entity type, used in `[is Type]` filters.
    pub fn type_name(&self, entity: &str) -> String {
        self.entity(entity)
            .and_then(|e| e.domain_name.as_deref())
            .unwrap_or(entity)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::with_naming(NamingStrategy::SnakeCase);
        registry.register(
            EntityMetadata::new("Person")
                .with_property(PropertyMetadata::scalar("Name", ScalarKind::Str))
                .with_property(PropertyMetadata::scalar("Age", ScalarKind::Int64).named("years"))
                .with_property(PropertyMetadata::link("BestFriend", "Person")),
        );
        registry
    }

    #[test]
    fn explicit_domain_name_wins_over_strategy() {
        let registry = registry();
        let declaring = TypeRef::entity("Person");
        assert_eq!(registry.field_name(&declaring, "Age"), "years");
    }

    #[test]
    fn strategy_applies_when_no_domain_name() {
        let registry = registry();
        let declaring = TypeRef::entity("Person");
        assert_eq!(registry.field_name(&declaring, "Name"), "name");
        assert_eq!(registry.field_name(&declaring, "BestFriend"), "best_friend");
    }

    #[test]
    fn unregistered_members_fall_back_to_strategy() {
        let registry = registry();
        assert_eq!(
            registry.field_name(&TypeRef::entity("Unknown"), "SomeField"),
            "some_field"
        );
    }

    #[test]
    fn property_lookup_distinguishes_scalars_and_links() {
        let registry = registry();
        let name = registry.property("Person", "Name").unwrap();
        assert_eq!(name.scalar_kind(), Some(&ScalarKind::Str));
        assert_eq!(name.link_target(), None);

        let friend = registry.property("Person", "BestFriend").unwrap();
        assert_eq!(friend.scalar_kind(), None);
        assert_eq!(friend.link_target(), Some("Person"));

        assert!(registry.property("Person", "Missing").is_none());
    }

    #[test]
    fn type_name_uses_registered_domain_name() {
        let mut registry = registry();
        registry.register(EntityMetadata::new("BlogPost").named("default::Post"));
        assert_eq!(registry.type_name("BlogPost"), "default::Post");
        assert_eq!(registry.type_name("Person"), "Person");
    }
}
