//! Kewt core types.
//!
//! Shared vocabulary of the mapping engine:
//!
//! - [`type_ref`]: [`TypeRef`] and [`Nullability`]
//! - [`qualified_name`]: bare type identity used for aliasing and caching
//! - [`mapping`]: sources, overrides, conversion functions and resolved mappings
//! - [`property`]: resolved property sets returned by the property resolver
//! - [`error`]: the error taxonomy of a mapping-function analysis

pub mod error;
pub mod mapping;
pub mod property;
pub mod qualified_name;
pub mod type_ref;

pub use error::{
    AmbiguityError, AmbiguousTarget, ConfigurationError, MappingError, ResolveError,
    UnresolvedMappingError,
};
pub use mapping::{
    ConversionContext, ConversionFunction, ExplicitConverter, MappedFunction, NameMapping,
    Parameter, PropertyMapping, Source,
};
pub use property::{Property, PropertyDiscoveryStrategy, ResolvedType};
pub use qualified_name::QualifiedName;
pub use type_ref::{Nullability, TypeRef};
