//! Mapper units.
//!
//! A mapper unit is one declared mapper type: a set of functions, some
//! abstract (their mappings get inferred) and some concrete helpers. Every
//! single-parameter function of the unit, abstract or not, is also available
//! as a converter while the unit's functions are analysed.
//!
//! Failures are isolated per function: one broken mapping is reported and the
//! rest of the unit is still analysed.

use tracing::{error, info, warn};

use kewt_core::{ConversionFunction, MappedFunction, MappingError, QualifiedName};
use kewt_mapper::{FunctionAnalyzer, FunctionDecl, TypeMatcher};
use kewt_registry::{AliasRegistry, PropertyResolver};

use crate::config::MapperConfig;

/// A declared mapper type and its functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperUnitDecl {
    pub name: QualifiedName,
    pub functions: Vec<FunctionDecl>,
}

impl MapperUnitDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: QualifiedName::from_qualified_string(name),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn function(mut self, decl: FunctionDecl) -> Self {
        self.functions.push(decl);
        self
    }

    /// Converters available to every function of the unit.
    pub fn conversion_pool(&self) -> Vec<ConversionFunction> {
        self.functions
            .iter()
            .filter_map(FunctionDecl::as_conversion_function)
            .collect()
    }

    /// Concrete functions that cannot serve as converters.
    pub fn unusable_functions(&self) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|f| !f.is_abstract && f.parameters.len() > 1)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// A mapping function whose analysis failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionFailure {
    pub function: String,
    pub error: MappingError,
}

/// Result of analysing every abstract function of a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub unit: QualifiedName,
    /// Successfully analysed functions, in declaration order.
    pub mapped: Vec<MappedFunction>,
    pub failures: Vec<FunctionFailure>,
}

impl UnitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn mapped_function(&self, name: &str) -> Option<&MappedFunction> {
        self.mapped.iter().find(|f| f.name == name)
    }

    pub fn failure(&self, name: &str) -> Option<&MappingError> {
        self.failures
            .iter()
            .find(|f| f.function == name)
            .map(|f| &f.error)
    }
}

/// What happened to a unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// Excluded by the whitelist or blacklist.
    Skipped(QualifiedName),
    Processed(UnitReport),
}

impl UnitOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, UnitOutcome::Skipped(_))
    }

    pub fn report(&self) -> Option<&UnitReport> {
        match self {
            UnitOutcome::Processed(report) => Some(report),
            UnitOutcome::Skipped(_) => None,
        }
    }
}

/// Analyse every abstract function of `unit`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub(crate) fn process_unit<R>(
    unit: &MapperUnitDecl,
    aliases: &AliasRegistry,
    resolver: &R,
    config: &MapperConfig,
) -> UnitOutcome
where
    R: PropertyResolver + ?Sized,
{
    if config.should_skip(&unit.name) {
        info!(unit = %unit.name, "skip");
        return UnitOutcome::Skipped(unit.name.clone());
    }

    info!(unit = %unit.name, functions = unit.functions.len(), "processing mapper unit");

    let unusable = unit.unusable_functions();
    if !unusable.is_empty() {
        warn!(
            unit = %unit.name,
            functions = ?unusable,
            "not abstract function with more than one parameter cannot be used"
        );
    }

    let pool = unit.conversion_pool();
    let analyzer = FunctionAnalyzer::new(resolver, TypeMatcher::new(aliases, &pool))
        .with_max_lift_depth(config.max_lift_depth);

    let mut report = UnitReport {
        unit: unit.name.clone(),
        mapped: Vec::new(),
        failures: Vec::new(),
    };
    for function in unit.functions.iter().filter(|f| f.is_abstract) {
        match analyzer.analyze(function) {
            Ok(mapped) => report.mapped.push(mapped),
            Err(err) => {
                error!(unit = %unit.name, function = %function.name, "{err}");
                report.failures.push(FunctionFailure {
                    function: function.name.clone(),
                    error: err,
                });
            }
        }
    }

    info!(
        unit = %unit.name,
        mapped = report.mapped.len(),
        failed = report.failures.len(),
        "finished mapper unit"
    );
    UnitOutcome::Processed(report)
}
