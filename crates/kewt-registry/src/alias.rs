//! AliasRegistry - interchangeable spellings of the same type.
//!
//! Values of `kotlin.Int`, `java.lang.Integer` and `int` are the same value as
//! far as mapping is concerned; so are `kotlin.collections.List`,
//! `kotlin.collections.MutableList` and `java.util.List`. The registry groups
//! such names into families and answers "are these two names the same type?".
//!
//! Some families are also marked as *collections*: single-parameter container
//! types whose elements may be converted one by one.
//!
//! # Example
//!
//! ```
//! use kewt_core::TypeRef;
//! use kewt_registry::AliasRegistry;
//!
//! let aliases = AliasRegistry::with_defaults();
//! assert!(aliases.are_aliases(&"kotlin.Int".into(), &"int".into()));
//! assert!(!aliases.are_aliases(&"kotlin.Int".into(), &"kotlin.Long".into()));
//!
//! let ids = TypeRef::new("java.util.List").with_params(vec![TypeRef::new("kotlin.Int")]);
//! assert!(aliases.is_collection(&ids));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use kewt_core::{QualifiedName, TypeRef};

/// Primitive families registered by [`AliasRegistry::with_defaults`].
const DEFAULT_FAMILIES: &[&[&str]] = &[
    &["kotlin.Int", "java.lang.Integer", "int"],
    &["kotlin.Long", "java.lang.Long", "long"],
    &["kotlin.Double", "java.lang.Double", "double"],
    &["kotlin.Float", "java.lang.Float", "float"],
    &["kotlin.String", "java.lang.String"],
    &["kotlin.Boolean", "java.lang.Boolean", "boolean"],
    &[
        "kotlin.collections.Map",
        "kotlin.collections.MutableMap",
        "java.util.Map",
    ],
];

/// Collection families registered by [`AliasRegistry::with_defaults`].
const DEFAULT_COLLECTIONS: &[&[&str]] = &[
    &[
        "kotlin.collections.List",
        "kotlin.collections.MutableList",
        "java.util.List",
    ],
    &[
        "kotlin.collections.Set",
        "kotlin.collections.MutableSet",
        "java.util.Set",
    ],
];

/// Equivalence table of type names.
///
/// Built once and shared by reference; lookups never mutate.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    /// Family index of every registered name.
    family_of: FxHashMap<QualifiedName, usize>,
    /// Members of each family. Merged families leave an empty slot behind.
    families: Vec<Vec<QualifiedName>>,
    /// Families whose members are single-parameter collections.
    collection_families: FxHashSet<usize>,
}

impl AliasRegistry {
    /// Create an empty registry: every name is only an alias of itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard primitive and collection families.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for family in DEFAULT_FAMILIES {
            registry.register_aliases(family);
        }
        for family in DEFAULT_COLLECTIONS {
            registry.register_collection(family);
        }
        registry
    }

    /// Declare the given names interchangeable.
    ///
    /// Families that already contain any of the names are merged.
    pub fn register_aliases(&mut self, names: &[&str]) -> usize {
        let names: Vec<QualifiedName> = names.iter().map(|n| QualifiedName::from(*n)).collect();

        let mut merged: Vec<usize> = names
            .iter()
            .filter_map(|n| self.family_of.get(n).copied())
            .collect();
        merged.sort_unstable();
        merged.dedup();

        let id = self.families.len();
        let mut members = Vec::new();
        let mut is_collection = false;
        for old in merged {
            members.append(&mut self.families[old]);
            is_collection |= self.collection_families.remove(&old);
        }
        for name in names {
            if !members.contains(&name) {
                members.push(name);
            }
        }
        for name in &members {
            self.family_of.insert(name.clone(), id);
        }
        self.families.push(members);
        if is_collection {
            self.collection_families.insert(id);
        }
        id
    }

    /// Declare the given names interchangeable single-parameter collections.
    pub fn register_collection(&mut self, names: &[&str]) {
        let id = self.register_aliases(names);
        self.collection_families.insert(id);
    }

    /// Whether two bare names denote the same type.
    pub fn are_aliases(&self, a: &QualifiedName, b: &QualifiedName) -> bool {
        if a == b {
            return true;
        }
        match (self.family_of.get(a), self.family_of.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// All spellings of `name`, including itself.
    pub fn aliases_of(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        match self.family_of.get(name) {
            Some(&id) => self.families[id].clone(),
            None => vec![name.clone()],
        }
    }

    /// Whether `ty` is a collection with exactly one type parameter.
    pub fn is_collection(&self, ty: &TypeRef) -> bool {
        ty.single_param().is_some()
            && self
                .family_of
                .get(&ty.name)
                .is_some_and(|id| self.collection_families.contains(id))
    }

    /// Every registered name.
    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.family_of.keys()
    }
}
