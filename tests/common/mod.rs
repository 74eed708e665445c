//! Shared fixtures for the integration tests.
//!
//! Builds sealed contexts from compact type descriptions and digs results out
//! of unit reports.

#![allow(dead_code)]

use kewt::{
    MappedFunction, MapperConfig, MapperContext, MapperUnitDecl, MappingError, TypeRef, TypeSchema,
    UnitReport,
};

/// Non-null type from a dotted name.
pub fn t(name: &str) -> TypeRef {
    TypeRef::new(name)
}

pub fn string() -> TypeRef {
    t("kotlin.String")
}

pub fn int() -> TypeRef {
    t("kotlin.Int")
}

pub fn uuid() -> TypeRef {
    t("java.util.UUID")
}

pub fn list(element: TypeRef) -> TypeRef {
    t("kotlin.collections.List").with_params(vec![element])
}

/// Builder for a sealed [`MapperContext`].
pub struct Fixture {
    ctx: MapperContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            ctx: MapperContext::new(config),
        }
    }

    /// Register a plain type with required properties.
    pub fn ty(self, name: &str, properties: &[(&str, TypeRef)]) -> Self {
        let schema = properties
            .iter()
            .fold(TypeSchema::new(), |schema, (prop, ty)| schema.property(*prop, ty.clone()));
        self.schema(name, schema)
    }

    pub fn schema(mut self, name: &str, schema: TypeSchema) -> Self {
        self.ctx
            .register_type(name, schema)
            .unwrap_or_else(|e| panic!("Failed to register {name}: {e}"));
        self
    }

    pub fn build(mut self) -> MapperContext {
        self.ctx.seal();
        self.ctx
    }
}

/// Process a unit that must not be skipped.
pub fn process(ctx: &MapperContext, unit: &MapperUnitDecl) -> UnitReport {
    ctx.process_unit(unit)
        .expect("context is sealed")
        .report()
        .cloned()
        .unwrap_or_else(|| panic!("unit {} was skipped", unit.name))
}

/// The mapped function, failing the test with the recorded error otherwise.
pub fn mapped<'r>(report: &'r UnitReport, function: &str) -> &'r MappedFunction {
    report.mapped_function(function).unwrap_or_else(|| {
        panic!(
            "function {function} not mapped: {:?}",
            report.failure(function)
        )
    })
}

/// The recorded failure of a function that must have failed.
pub fn failure<'r>(report: &'r UnitReport, function: &str) -> &'r MappingError {
    report
        .failure(function)
        .unwrap_or_else(|| panic!("function {function} unexpectedly succeeded"))
}

/// Dotted source selector feeding `target`.
pub fn source_of(function: &MappedFunction, target: &str) -> String {
    function
        .mapping_for(target)
        .unwrap_or_else(|| panic!("target {target} not mapped in {}", function.name))
        .source
        .selector()
}

/// Name of the conversion function used for `target`, if any.
pub fn converter_of(function: &MappedFunction, target: &str) -> Option<String> {
    function
        .mapping_for(target)
        .and_then(|m| m.conversion.conversion_function.as_ref())
        .map(|f| f.name.clone())
}
