//! Type knowledge for the kewt mapping engine.
//!
//! - [`AliasRegistry`]: interchangeable spellings of primitive and collection types
//! - [`SchemaRegistry`]: caller-supplied property sets of user types
//! - [`PropertyResolver`]: the resolution seam consumed by the engine
//! - [`PropertyCache`]: thread-safe memo around any resolver

pub mod alias;
pub mod resolver;
pub mod schema;

pub use alias::AliasRegistry;
pub use resolver::{PropertyCache, PropertyResolver};
pub use schema::{SchemaError, SchemaRegistry, TypeSchema};
