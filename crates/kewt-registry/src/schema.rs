//! SchemaRegistry - caller-supplied type descriptions.
//!
//! The mapping engine never inspects compiled code. Every type it needs to look
//! inside is described up front as a [`TypeSchema`]: an ordered list of
//! properties plus the convention used to discover them.
//!
//! # Example
//!
//! ```
//! use kewt_core::{PropertyDiscoveryStrategy, TypeRef};
//! use kewt_registry::{PropertyResolver, SchemaRegistry, TypeSchema};
//!
//! let mut schemas = SchemaRegistry::with_builtins();
//! schemas
//!     .register(
//!         "com.acme.Person",
//!         TypeSchema::new()
//!             .property("id", TypeRef::new("kotlin.Long"))
//!             .defaulted("nickname", TypeRef::new("kotlin.String").nullable()),
//!     )
//!     .unwrap();
//!
//! let person = schemas.resolve(&TypeRef::new("com.acme.Person")).unwrap();
//! assert_eq!(person.properties.len(), 2);
//! assert_eq!(person.strategy, PropertyDiscoveryStrategy::Plain);
//! ```

use rustc_hash::FxHashMap;
use thiserror::Error;

use kewt_core::{
    Property, PropertyDiscoveryStrategy, QualifiedName, ResolveError, ResolvedType, TypeRef,
};

use crate::PropertyResolver;

/// Leaf types known without registration. They have no properties.
const BUILTIN_LEAVES: &[&str] = &[
    "kotlin.String",
    "kotlin.Long",
    "kotlin.Int",
    "kotlin.Double",
    "kotlin.Float",
    "kotlin.Boolean",
    "java.lang.String",
    "java.lang.Long",
    "java.lang.Integer",
    "java.lang.Double",
    "java.lang.Float",
    "java.lang.Boolean",
    "int",
    "long",
    "double",
    "float",
    "boolean",
    "java.util.UUID",
    "kotlin.collections.List",
    "kotlin.collections.MutableList",
    "kotlin.collections.Set",
    "kotlin.collections.MutableSet",
    "kotlin.collections.Map",
    "kotlin.collections.MutableMap",
    "java.util.List",
    "java.util.Set",
    "java.util.Map",
];

/// Errors raised while populating a [`SchemaRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    #[error("duplicate property '{property}' in type '{type_name}'")]
    DuplicateProperty { type_name: String, property: String },
}

/// Description of one type's properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSchema {
    pub strategy: PropertyDiscoveryStrategy,
    pub properties: Vec<Property>,
}

impl TypeSchema {
    /// A plain type with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: PropertyDiscoveryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Add a required property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(Property::new(name, ty));
        self
    }

    /// Add a property that declares a default value.
    #[must_use]
    pub fn defaulted(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(Property::new(name, ty).with_default());
        self
    }

    fn duplicate_property(&self) -> Option<&str> {
        self.properties.iter().enumerate().find_map(|(i, p)| {
            self.properties[..i]
                .iter()
                .any(|q| q.name == p.name)
                .then_some(p.name.as_str())
        })
    }
}

/// Registry of type schemas keyed by bare qualified name.
///
/// Generic arguments and nullability are not part of the key: `List<Int>?`
/// and `List<String>` resolve to the same schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: FxHashMap<QualifiedName, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the primitive and collection leaf types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_LEAVES {
            registry
                .types
                .insert(QualifiedName::from_qualified_string(name), TypeSchema::new());
        }
        registry
    }

    /// Register a type schema.
    pub fn register(&mut self, name: &str, schema: TypeSchema) -> Result<(), SchemaError> {
        let qname = QualifiedName::from_qualified_string(name);
        if self.types.contains_key(&qname) {
            return Err(SchemaError::DuplicateType(qname.to_string()));
        }
        if let Some(property) = schema.duplicate_property() {
            return Err(SchemaError::DuplicateProperty {
                type_name: qname.to_string(),
                property: property.to_string(),
            });
        }
        self.types.insert(qname, schema);
        Ok(())
    }

    /// Register a type without properties.
    pub fn register_leaf(&mut self, name: &str) -> Result<(), SchemaError> {
        self.register(name, TypeSchema::new())
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&TypeSchema> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl PropertyResolver for SchemaRegistry {
    fn resolve(&self, ty: &TypeRef) -> Result<ResolvedType, ResolveError> {
        let schema = self
            .types
            .get(&ty.name)
            .ok_or_else(|| ResolveError::UnknownType(ty.qualified_name()))?;
        Ok(ResolvedType {
            ty: ty.clone(),
            properties: schema.properties.clone(),
            strategy: schema.strategy,
        })
    }
}
