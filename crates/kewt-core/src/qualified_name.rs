use std::fmt;

/// Bare identity of a type: namespace path plus simple name.
///
/// Nullability and type parameters are not part of a qualified name. This is
/// the key used by the alias registry and the property cache.
///
/// # Examples
///
/// ```
/// use kewt_core::QualifiedName;
///
/// let uuid = QualifiedName::new("UUID", vec!["java".into(), "util".into()]);
/// assert_eq!(uuid.to_string(), "java.util.UUID");
///
/// let local = QualifiedName::global("Person");
/// assert_eq!(local.to_string(), "Person");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Namespace path (e.g., ["kotlin", "collections"])
    /// Empty for the default namespace
    pub namespace: Vec<String>,
    /// Simple name (e.g., "List", "Person")
    pub name: String,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Create a qualified name in the default namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            namespace: Vec::new(),
            name: name.into(),
        }
    }

    /// Create from a dotted string (e.g., "kotlin.collections.List").
    ///
    /// Splits on "." - the last segment is the name, the rest is the namespace.
    /// Empty segments are dropped, so ".kotlin.Int" == "kotlin.Int".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                namespace: parts,
                name,
            },
            None => Self::global(""),
        }
    }

    /// Check if this is in the default namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace as a dotted string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join(".")
    }

    /// Check whether this name lives in `prefix` or one of its sub-namespaces.
    ///
    /// Prefix matching is segment-wise: `com.acme` matches `com.acme.hr.Person`
    /// but not `com.acmecorp.Person`.
    pub fn is_within(&self, prefix: &str) -> bool {
        let prefix: Vec<&str> = prefix.split('.').filter(|p| !p.is_empty()).collect();
        prefix.len() <= self.namespace.len()
            && prefix
                .iter()
                .zip(&self.namespace)
                .all(|(a, b)| *a == b.as_str())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name() {
        let name = QualifiedName::global("Person");
        assert_eq!(name.name, "Person");
        assert!(name.is_global());
        assert_eq!(name.to_string(), "Person");
    }

    #[test]
    fn from_qualified_string() {
        let name = QualifiedName::from_qualified_string("kotlin.collections.List");
        assert_eq!(name.name, "List");
        assert_eq!(name.namespace, vec!["kotlin", "collections"]);
        assert_eq!(name.namespace_string(), "kotlin.collections");

        let bare = QualifiedName::from_qualified_string("int");
        assert_eq!(bare.name, "int");
        assert!(bare.is_global());
    }

    #[test]
    fn from_qualified_string_drops_empty_segments() {
        let a = QualifiedName::from_qualified_string(".kotlin.Int");
        let b = QualifiedName::from_qualified_string("kotlin.Int");
        assert_eq!(a, b);

        let empty = QualifiedName::from_qualified_string(".");
        assert_eq!(empty.name, "");
        assert!(empty.is_global());
    }

    #[test]
    fn is_within_matches_whole_segments() {
        let name = QualifiedName::from("com.acme.hr.Person");
        assert!(name.is_within("com.acme"));
        assert!(name.is_within("com.acme.hr"));
        assert!(name.is_within(""));
        assert!(!name.is_within("com.acm"));
        assert!(!name.is_within("com.acme.hr.Person.extra"));
    }
}
