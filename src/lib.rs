//! kewt - infer field-by-field mappings between typed objects.
//!
//! Given a declared conversion function from one or more source objects to a
//! target object, kewt works out which source expression produces each target
//! field: by explicit directive, by matching name, or by matching type,
//! possibly through user conversion functions, null-safe unwrapping and
//! element-wise collection mapping.
//!
//! This crate is the facade over the workspace:
//!
//! - [`MapperContext`]: shared aliases, schemas, property cache and config
//! - [`MapperUnitDecl`]: one mapper type and its functions
//! - [`MapperConfig`]: host options
//! - [`init_logging`]: optional `tracing` subscriber setup
//!
//! The engine itself lives in `kewt-mapper`, the type knowledge in
//! `kewt-registry` and the shared data model in `kewt-core`.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod unit;

pub use config::MapperConfig;
pub use context::{ContextError, MapperContext};
pub use error::{KewtError, Result};
pub use logging::{LogLevel, init_logging};
pub use unit::{FunctionFailure, MapperUnitDecl, UnitOutcome, UnitReport};

pub use kewt_core::{
    AmbiguityError, ConfigurationError, ConversionContext, ConversionFunction, MappedFunction,
    MappingError, Nullability, Parameter, PropertyDiscoveryStrategy, PropertyMapping,
    QualifiedName, ResolveError, Source, TypeRef, UnresolvedMappingError,
};
pub use kewt_mapper::{FunctionDecl, MappingDirective};
pub use kewt_registry::{AliasRegistry, PropertyResolver, SchemaRegistry, TypeSchema};
