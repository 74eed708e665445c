//! Error types for mapping analysis.
//!
//! ## Error Hierarchy
//!
//! ```text
//! MappingError (per mapping function)
//! ├── ConfigurationError     - invalid overrides, merge target mismatch, unused lifted sources
//! ├── AmbiguityError         - competing implicit candidates or conversion functions
//! ├── UnresolvedMappingError - targets with no candidate and no default
//! └── ResolveError           - property resolution failures
//! ```
//!
//! Every variant carries the complete offending set (all duplicates, all
//! candidates, all stuck targets) rather than the first one found.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::{
    ConversionFunction, ExplicitConverter, NameMapping, Parameter, PropertyMapping, Source, TypeRef,
};

// ============================================================================
// Configuration Errors
// ============================================================================

/// The user-supplied configuration of a mapping function is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// More than one explicit mapping names the same target.
    #[error("more than one source mapped to the same target: {}", join(.mappings))]
    DuplicateTargetMapping { mappings: Vec<NameMapping> },

    /// Explicit mappings reference sources that do not exist.
    #[error("not existing sources: {}", .selectors.join(", "))]
    NotExistingSources { selectors: Vec<String> },

    /// Explicit mappings or converters reference targets that do not exist.
    #[error("not existing targets: {}", .targets.join(", "))]
    NotExistingTargets { targets: Vec<String> },

    /// Explicit converters name functions that are not in the pool.
    #[error("unknown converters: {}", join(.converters))]
    UnknownConverters { converters: Vec<ExplicitConverter> },

    /// An explicit mapping cannot be converted to its target type.
    #[error("cannot map properties, source {{ {mapped} }}, target {{ {target} }}")]
    IncompatibleExplicitMapping { mapped: Source, target: Parameter },

    /// Lifted sources were discovered but never consumed by an explicit mapping.
    #[error("lifted property not consumed: {}", join(.sources))]
    LiftedSourceNotConsumed { sources: Vec<Source> },

    /// A lifted path is deeper than allowed.
    #[error("lifted path '{selector}' has depth {depth}, maximum is {max}")]
    LiftDepthExceeded {
        selector: String,
        depth: usize,
        max: usize,
    },

    /// The merge-target parameter's type differs from the return type.
    #[error(
        "target parameter type does not match return type. target parameter: {parameter}, return type: {return_type}"
    )]
    MergeTargetTypeMismatch {
        parameter: Parameter,
        return_type: TypeRef,
    },

    /// More than one parameter is marked as merge target.
    #[error("more than one merge target parameter: {}", .parameters.join(", "))]
    MultipleMergeTargets { parameters: Vec<String> },

    /// A mapping directive cannot be interpreted.
    #[error("invalid mapping directive '{selector}' -> '{target}': {reason}")]
    InvalidDirective {
        selector: String,
        target: String,
        reason: String,
    },
}

// ============================================================================
// Ambiguity Errors
// ============================================================================

/// A target field with more than one equally valid source.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousTarget {
    pub target: Parameter,
    pub candidates: Vec<PropertyMapping>,
}

impl Display for AmbiguousTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= [{}]", self.target, join(&self.candidates))
    }
}

/// Two or more candidates are equally valid and none was chosen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmbiguityError {
    /// Target fields reachable from several sources.
    #[error("ambiguous mapping: {}", join(.targets))]
    Mapping { targets: Vec<AmbiguousTarget> },

    /// Several conversion functions can convert between the same types.
    #[error("more than one function can convert ({from}) -> {to}: [{}]", join(.candidates))]
    Conversion {
        from: TypeRef,
        to: TypeRef,
        candidates: Vec<ConversionFunction>,
    },
}

// ============================================================================
// Unresolved Mappings
// ============================================================================

/// Target fields with no candidate source and no default value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("not mapped targets: {}", join(.targets))]
pub struct UnresolvedMappingError {
    pub targets: Vec<Parameter>,
}

// ============================================================================
// Property Resolution
// ============================================================================

/// The property resolver could not produce a property set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The type is not described by the schema.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Resolving the type re-entered its own resolution.
    #[error("cyclic resolution of type: {0}")]
    Cycle(String),
}

// ============================================================================
// Unified Error
// ============================================================================

/// Failure of the analysis of one mapping function.
///
/// The engine never emits a partial mapping set: any of these aborts the
/// function it was raised for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Ambiguity(#[from] AmbiguityError),

    #[error(transparent)]
    Unresolved(#[from] UnresolvedMappingError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl MappingError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, MappingError::Configuration(_))
    }

    pub fn is_ambiguity(&self) -> bool {
        matches!(self, MappingError::Ambiguity(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, MappingError::Unresolved(_))
    }

    pub fn is_resolve(&self) -> bool {
        matches!(self, MappingError::Resolve(_))
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeRef {
        TypeRef::new("kotlin.String")
    }

    #[test]
    fn duplicate_target_display_lists_all() {
        let err = ConfigurationError::DuplicateTargetMapping {
            mappings: vec![
                NameMapping::new("person", vec!["name".into()], "name"),
                NameMapping::new("pet", vec!["name".into()], "name"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "more than one source mapped to the same target: name <= person.name, name <= pet.name"
        );
    }

    #[test]
    fn unresolved_display() {
        let err = UnresolvedMappingError {
            targets: vec![
                Parameter::new("id", string()),
                Parameter::new("age", TypeRef::new("kotlin.Int")),
            ],
        };
        assert_eq!(
            err.to_string(),
            "not mapped targets: id: kotlin.String, age: kotlin.Int"
        );
    }

    #[test]
    fn conversion_ambiguity_display() {
        let int = TypeRef::new("kotlin.Int");
        let err = AmbiguityError::Conversion {
            from: string(),
            to: int.clone(),
            candidates: vec![
                ConversionFunction::new("f", Parameter::new("x", string()), int.clone()),
                ConversionFunction::new("g", Parameter::new("x", string()), int),
            ],
        };
        assert_eq!(
            err.to_string(),
            "more than one function can convert (kotlin.String) -> kotlin.Int: [f(x: kotlin.String): kotlin.Int, g(x: kotlin.String): kotlin.Int]"
        );
    }

    #[test]
    fn mapping_error_from_variants() {
        let err: MappingError = ResolveError::UnknownType("com.acme.Person".into()).into();
        assert!(err.is_resolve());
        assert_eq!(err.to_string(), "unknown type: com.acme.Person");

        let err: MappingError = UnresolvedMappingError { targets: vec![] }.into();
        assert!(err.is_unresolved());
        assert!(!err.is_configuration());
    }
}
