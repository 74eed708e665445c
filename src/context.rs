//! Mapper context.
//!
//! A [`MapperContext`] owns everything shared between mapper units: the alias
//! table, the type schemas with their property cache, and the configuration.
//!
//! Types and aliases are registered first. [`MapperContext::seal`] then
//! freezes the schemas behind a thread-safe [`PropertyCache`], after which
//! units can be processed, from several threads if needed.
//!
//! # Example
//!
//! ```
//! use kewt::{FunctionDecl, MapperConfig, MapperContext, MapperUnitDecl, TypeSchema};
//! use kewt_core::TypeRef;
//!
//! let mut ctx = MapperContext::new(MapperConfig::default());
//! let person = TypeSchema::new()
//!     .property("id", TypeRef::new("kotlin.Long"))
//!     .property("name", TypeRef::new("kotlin.String"));
//! ctx.register_type("com.acme.Person", person.clone()).unwrap();
//! ctx.register_type("com.acme.PersonDto", person).unwrap();
//! ctx.seal();
//!
//! let unit = MapperUnitDecl::new("com.acme.PersonMapper").function(
//!     FunctionDecl::new("toDto", TypeRef::new("com.acme.PersonDto"))
//!         .param("person", TypeRef::new("com.acme.Person")),
//! );
//! let outcome = ctx.process_unit(&unit).unwrap();
//! let report = outcome.report().unwrap();
//! assert!(report.is_success());
//! assert_eq!(report.mapped[0].mappings.len(), 2);
//! ```

use thiserror::Error;
use tracing::info;

use kewt_registry::{AliasRegistry, PropertyCache, SchemaRegistry, TypeSchema};

use crate::KewtError;
use crate::config::MapperConfig;
use crate::unit::{MapperUnitDecl, UnitOutcome, process_unit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context is already sealed")]
    AlreadySealed,

    #[error("context is not sealed")]
    NotSealed,
}

/// Shared registries and configuration for mapper units.
pub struct MapperContext {
    config: MapperConfig,
    aliases: AliasRegistry,
    /// Schemas being registered (consumed on seal).
    schemas: Option<SchemaRegistry>,
    /// Memoized resolver (available after seal).
    resolver: Option<PropertyCache<SchemaRegistry>>,
}

impl MapperContext {
    /// Create a context with the default aliases and built-in leaf types.
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            aliases: AliasRegistry::with_defaults(),
            schemas: Some(SchemaRegistry::with_builtins()),
            resolver: None,
        }
    }

    /// Create a context configured from host options.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, KewtError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(Self::new(MapperConfig::from_options(options)?))
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    /// Describe a type's properties.
    pub fn register_type(&mut self, name: &str, schema: TypeSchema) -> Result<(), KewtError> {
        let schemas = self.schemas.as_mut().ok_or(ContextError::AlreadySealed)?;
        schemas.register(name, schema)?;
        Ok(())
    }

    /// Declare extra interchangeable type names.
    pub fn register_aliases(&mut self, names: &[&str]) -> Result<(), ContextError> {
        if self.is_sealed() {
            return Err(ContextError::AlreadySealed);
        }
        self.aliases.register_aliases(names);
        Ok(())
    }

    /// Declare extra single-parameter collection types.
    pub fn register_collection(&mut self, names: &[&str]) -> Result<(), ContextError> {
        if self.is_sealed() {
            return Err(ContextError::AlreadySealed);
        }
        self.aliases.register_collection(names);
        Ok(())
    }

    /// Freeze registrations. Calling it again is a no-op.
    pub fn seal(&mut self) {
        if let Some(schemas) = self.schemas.take() {
            info!(types = schemas.len(), "sealing mapper context");
            self.resolver = Some(PropertyCache::new(schemas));
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.resolver.is_some()
    }

    /// The memoized property resolver (available after sealing).
    pub fn resolver(&self) -> Option<&PropertyCache<SchemaRegistry>> {
        self.resolver.as_ref()
    }

    /// Analyse one mapper unit.
    pub fn process_unit(&self, unit: &MapperUnitDecl) -> Result<UnitOutcome, ContextError> {
        let resolver = self.resolver.as_ref().ok_or(ContextError::NotSealed)?;
        Ok(process_unit(unit, &self.aliases, resolver, &self.config))
    }

    /// Analyse several units in order.
    ///
    /// A failing function never stops the batch; see each unit's report.
    pub fn process_batch(&self, units: &[MapperUnitDecl]) -> Result<Vec<UnitOutcome>, ContextError> {
        let resolver = self.resolver.as_ref().ok_or(ContextError::NotSealed)?;
        info!(units = units.len(), "processing mapper units");
        Ok(units
            .iter()
            .map(|unit| process_unit(unit, &self.aliases, resolver, &self.config))
            .collect())
    }
}

impl Default for MapperContext {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}
