//! Resolved property sets.
//!
//! A [`ResolvedType`] is what the property resolver returns for a type: the
//! flat set of named, typed properties plus the convention used to discover
//! them.

use std::fmt::{self, Display, Formatter};

use crate::{Parameter, TypeRef};

/// How a type exposes its properties.
///
/// Only the renderer cares about this (constructor call vs. setters vs.
/// message builder). The matching algorithm never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyDiscoveryStrategy {
    /// Constructor parameters / plain fields.
    #[default]
    Plain,
    /// Getter/setter pairs.
    AccessorStyle,
    /// Generated message classes with builders.
    MessageStyle,
}

impl PropertyDiscoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyDiscoveryStrategy::Plain => "plain",
            PropertyDiscoveryStrategy::AccessorStyle => "accessor-style",
            PropertyDiscoveryStrategy::MessageStyle => "message-style",
        }
    }
}

impl Display for PropertyDiscoveryStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed property of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    /// The property declares a default value, so it may stay unmapped.
    pub has_default: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn to_parameter(&self) -> Parameter {
        Parameter::new(self.name.clone(), self.ty.clone())
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if self.has_default {
            write!(f, " = <default>")?;
        }
        Ok(())
    }
}

/// A type together with its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub ty: TypeRef,
    pub properties: Vec<Property>,
    pub strategy: PropertyDiscoveryStrategy,
}

impl ResolvedType {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Properties as target slots.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.properties.iter().map(Property::to_parameter).collect()
    }

    /// Names of properties that declare a default value.
    pub fn defaulted(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties
            .iter()
            .filter(|p| p.has_default)
            .map(|p| p.name.as_str())
    }
}

impl Display for ResolvedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {{ ", self.strategy, self.ty)?;
        for (i, p) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, " }}")
    }
}
