//! Mapping data model.
//!
//! Everything here is an immutable value built once per analysis of a mapping
//! function and dropped after the mapping set is produced.

use std::fmt::{self, Display, Formatter};

use crate::{ResolvedType, TypeRef};

/// A named, typed slot: a function parameter or a target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A value available to feed target fields.
///
/// An empty `path` is the whole input parameter; otherwise the value is
/// reached by navigating the named properties from that parameter. Sources
/// with more than one path segment are *lifted* and only ever consumed by an
/// explicit [`NameMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub parameter_name: String,
    pub path: Vec<String>,
    /// Type of the path terminus.
    pub ty: TypeRef,
}

impl Source {
    pub fn new(parameter_name: impl Into<String>, path: Vec<String>, ty: TypeRef) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            path,
            ty,
        }
    }

    /// The whole parameter as a source.
    pub fn parameter(parameter_name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(parameter_name, Vec::new(), ty)
    }

    /// A direct property of a parameter.
    pub fn property(
        parameter_name: impl Into<String>,
        property: impl Into<String>,
        ty: TypeRef,
    ) -> Self {
        Self::new(parameter_name, vec![property.into()], ty)
    }

    /// Name compared against target fields: the last path segment, or the
    /// parameter name for a whole-parameter source.
    pub fn terminal_name(&self) -> &str {
        self.path
            .last()
            .map(String::as_str)
            .unwrap_or(&self.parameter_name)
    }

    /// Whether the source reaches through more than one property.
    pub fn is_lifted(&self) -> bool {
        self.path.len() > 1
    }

    /// Whether this source is the one named by `(parameter_name, path)`.
    pub fn is_at(&self, parameter_name: &str, path: &[String]) -> bool {
        self.parameter_name == parameter_name && self.path == path
    }

    /// Dotted selector, e.g. `person.name.firstName`.
    pub fn selector(&self) -> String {
        std::iter::once(self.parameter_name.as_str())
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.selector(), self.ty)
    }
}

/// Explicit override: the exact source feeding one target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameMapping {
    pub parameter_name: String,
    pub source_path: Vec<String>,
    pub target_name: String,
}

impl NameMapping {
    pub fn new(
        parameter_name: impl Into<String>,
        source_path: Vec<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            source_path,
            target_name: target_name.into(),
        }
    }

    pub fn selector(&self) -> String {
        std::iter::once(self.parameter_name.as_str())
            .chain(self.source_path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Display for NameMapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {}", self.target_name, self.selector())
    }
}

/// Pins the conversion function used for a target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExplicitConverter {
    pub target_name: String,
    pub converter_name: String,
}

impl ExplicitConverter {
    pub fn new(target_name: impl Into<String>, converter_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            converter_name: converter_name.into(),
        }
    }
}

impl Display for ExplicitConverter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.target_name, self.converter_name)
    }
}

/// A single-argument function usable to adapt one type into another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionFunction {
    pub name: String,
    pub parameter: Parameter,
    pub return_type: TypeRef,
    /// Called as `value.name()` rather than `name(value)`; renderer concern only.
    pub is_member_style: bool,
}

impl ConversionFunction {
    pub fn new(name: impl Into<String>, parameter: Parameter, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameter,
            return_type,
            is_member_style: false,
        }
    }

    #[must_use]
    pub fn member_style(mut self) -> Self {
        self.is_member_style = true;
        self
    }
}

impl Display for ConversionFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.name, self.parameter, self.return_type)
    }
}

/// How a source value is adapted to its target slot.
///
/// The default value means "assign directly".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConversionContext {
    pub conversion_function: Option<ConversionFunction>,
    /// Apply the conversion to each collection element.
    pub uses_element_mapping: bool,
    /// Apply the conversion only when the value is non-null.
    pub uses_null_safe_unwrap: bool,
}

impl ConversionContext {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn via(function: ConversionFunction) -> Self {
        Self {
            conversion_function: Some(function),
            ..Self::default()
        }
    }

    /// Whether the value is assigned as-is.
    pub fn is_direct(&self) -> bool {
        self.conversion_function.is_none()
            && !self.uses_element_mapping
            && !self.uses_null_safe_unwrap
    }

    #[must_use]
    pub fn with_element_mapping(mut self) -> Self {
        self.uses_element_mapping = true;
        self
    }

    #[must_use]
    pub fn with_null_safe_unwrap(mut self) -> Self {
        self.uses_null_safe_unwrap = true;
        self
    }
}

impl Display for ConversionContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "null-safe: {}, element mapping: {}",
            self.uses_null_safe_unwrap, self.uses_element_mapping
        )?;
        if let Some(function) = &self.conversion_function {
            write!(f, ", func: {function}")?;
        }
        Ok(())
    }
}

/// One resolved target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyMapping {
    pub source: Source,
    pub target: Parameter,
    pub conversion: ConversionContext,
}

impl Display for PropertyMapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {}", self.target, self.source)?;
        if !self.conversion.is_direct() {
            write!(f, " ({})", self.conversion)?;
        }
        Ok(())
    }
}

/// A fully analysed mapping function, handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedFunction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: ResolvedType,
    /// In target declaration order. Targets left to their default are absent.
    pub mappings: Vec<PropertyMapping>,
    /// Parameter whose existing field values replace absent source values.
    pub merge_target: Option<String>,
}

impl MappedFunction {
    /// Mapping feeding the given target field, if any.
    pub fn mapping_for(&self, target: &str) -> Option<&PropertyMapping> {
        self.mappings.iter().find(|m| m.target.name == target)
    }

    /// Whether absent source values fall back to the merge target's fields.
    pub fn is_patch(&self) -> bool {
        self.merge_target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeRef {
        TypeRef::new("kotlin.String")
    }

    #[test]
    fn source_terminal_name() {
        let whole = Source::parameter("age", TypeRef::new("kotlin.Int"));
        assert_eq!(whole.terminal_name(), "age");
        assert!(!whole.is_lifted());

        let lifted = Source::new(
            "person",
            vec!["name".into(), "firstName".into()],
            string(),
        );
        assert_eq!(lifted.terminal_name(), "firstName");
        assert!(lifted.is_lifted());
        assert_eq!(lifted.to_string(), "person.name.firstName: kotlin.String");
    }

    #[test]
    fn name_mapping_display() {
        let m = NameMapping::new("person", vec!["surname".into()], "lastName");
        assert_eq!(m.to_string(), "lastName <= person.surname");
    }

    #[test]
    fn conversion_context_direct() {
        assert!(ConversionContext::direct().is_direct());

        let f = ConversionFunction::new("f", Parameter::new("x", TypeRef::new("kotlin.Int")), string());
        let ctx = ConversionContext::via(f).with_element_mapping();
        assert!(!ctx.is_direct());
        assert!(ctx.uses_element_mapping);
        assert!(!ctx.uses_null_safe_unwrap);
    }

    #[test]
    fn property_mapping_display() {
        let mapping = PropertyMapping {
            source: Source::property("person", "name", string()),
            target: Parameter::new("name", string()),
            conversion: ConversionContext::direct(),
        };
        assert_eq!(
            mapping.to_string(),
            "name: kotlin.String <= person.name: kotlin.String"
        );
    }
}
