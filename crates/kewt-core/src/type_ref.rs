//! TypeRef - a type as seen by the mapping engine.
//!
//! A [`TypeRef`] is a bare [`QualifiedName`] plus a nullability marker and an
//! ordered list of type parameters. Two type refs are structurally equal only
//! when all of those match exactly; looser compatibility (aliases, nullability
//! flow) is decided by the conversion resolver, not here.
//!
//! # Example
//!
//! ```
//! use kewt_core::{Nullability, TypeRef};
//!
//! let ids = TypeRef::new("kotlin.collections.List").with_params(vec![TypeRef::new("kotlin.Int")]);
//! assert_eq!(ids.to_string(), "kotlin.collections.List<kotlin.Int>");
//!
//! let maybe = TypeRef::new("kotlin.String").nullable();
//! assert_eq!(maybe.nullability, Nullability::Nullable);
//! assert_eq!(maybe.to_string(), "kotlin.String?");
//! ```

use std::fmt::{self, Display, Formatter};

use crate::QualifiedName;

/// Nullability of a type.
///
/// `Platform` means the nullability is unknown (the type came from a host
/// without nullability information). Such values are accepted both where null
/// is allowed and where it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullability {
    /// The value is never null.
    #[default]
    NonNull,
    /// The value may be null (`T?`).
    Nullable,
    /// Nullability unknown (`T!`).
    Platform,
}

impl Nullability {
    /// Suffix used when displaying a type with this nullability.
    pub fn suffix(self) -> &'static str {
        match self {
            Nullability::NonNull => "",
            Nullability::Nullable => "?",
            Nullability::Platform => "!",
        }
    }

    /// Whether a value of `self` nullability may flow into a `target` slot.
    ///
    /// Non-null and platform values flow anywhere; nullable values only flow
    /// into nullable or platform slots.
    pub fn flows_into(self, target: Nullability) -> bool {
        match self {
            Nullability::NonNull | Nullability::Platform => true,
            Nullability::Nullable => {
                matches!(target, Nullability::Nullable | Nullability::Platform)
            }
        }
    }
}

/// A type reference: bare name, nullability and type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Namespace and simple name.
    pub name: QualifiedName,
    /// Nullability marker.
    pub nullability: Nullability,
    /// Generic arguments, in declaration order.
    pub type_parameters: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a non-null type without parameters from a dotted name.
    pub fn new(qualified: &str) -> Self {
        Self::from_name(QualifiedName::from_qualified_string(qualified))
    }

    /// Create a non-null type without parameters.
    pub fn from_name(name: QualifiedName) -> Self {
        Self {
            name,
            nullability: Nullability::NonNull,
            type_parameters: Vec::new(),
        }
    }

    /// Return a copy with the given nullability.
    #[must_use]
    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }

    /// Return a nullable copy (`T?`).
    #[must_use]
    pub fn nullable(self) -> Self {
        self.with_nullability(Nullability::Nullable)
    }

    /// Return a platform-typed copy (`T!`).
    #[must_use]
    pub fn platform(self) -> Self {
        self.with_nullability(Nullability::Platform)
    }

    /// Return a copy with the given type parameters.
    #[must_use]
    pub fn with_params(mut self, type_parameters: Vec<TypeRef>) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    /// Return a copy with type parameters erased.
    #[must_use]
    pub fn bare(&self) -> Self {
        Self {
            name: self.name.clone(),
            nullability: self.nullability,
            type_parameters: Vec::new(),
        }
    }

    /// Namespace and simple name, e.g. `kotlin.collections.List`.
    pub fn qualified_name(&self) -> String {
        self.name.to_string()
    }

    /// Whether this type may hold null.
    pub fn is_nullable(&self) -> bool {
        self.nullability == Nullability::Nullable
    }

    /// The single type parameter, if the type has exactly one.
    pub fn single_param(&self) -> Option<&TypeRef> {
        match self.type_parameters.as_slice() {
            [param] => Some(param),
            _ => None,
        }
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_parameters.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, ">")?;
        }
        write!(f, "{}", self.nullability.suffix())
    }
}
