//! Mapping resolution engine.
//!
//! Assigns every target field of a mapping function exactly one source.
//!
//! ## Phases
//!
//! 0. **Validate** explicit mappings and converters against the available
//!    sources, targets and conversion functions.
//! 1. **Explicit**: targets named by a [`NameMapping`] take that exact source.
//! 2. **Name match**: remaining targets take the one non-lifted source with
//!    the same name whose type converts.
//! 3. **Type match**: remaining targets take the one non-lifted source whose
//!    type converts, whatever its name.
//! 4. **Complete**: targets still unmapped must declare a default, and every
//!    lifted source must have been consumed.
//!
//! Each phase sees the pool left by the previous one: a committed source or
//! target never takes part again. Ambiguities found inside one phase are
//! reported together, and the engine never returns a partial mapping set.

mod complete;
mod explicit;
mod implicit;
mod validate;

use rustc_hash::FxHashSet;
use tracing::debug;

use kewt_core::{
    ExplicitConverter, MappingError, NameMapping, Parameter, PropertyMapping, Source,
};

use crate::conversion::TypeMatcher;

/// Everything the engine needs to resolve one mapping function.
#[derive(Debug, Clone, Default)]
pub struct MappingRequest {
    /// Candidate sources, including lifted ones.
    pub sources: Vec<Source>,
    /// Target fields in declaration order.
    pub targets: Vec<Parameter>,
    pub name_mappings: Vec<NameMapping>,
    pub explicit_converters: Vec<ExplicitConverter>,
    /// Targets allowed to stay unmapped.
    pub defaulted_targets: FxHashSet<String>,
}

impl MappingRequest {
    pub fn new(sources: Vec<Source>, targets: Vec<Parameter>) -> Self {
        Self {
            sources,
            targets,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name_mappings(mut self, name_mappings: Vec<NameMapping>) -> Self {
        self.name_mappings = name_mappings;
        self
    }

    #[must_use]
    pub fn with_explicit_converters(mut self, explicit_converters: Vec<ExplicitConverter>) -> Self {
        self.explicit_converters = explicit_converters;
        self
    }

    #[must_use]
    pub fn with_defaults<I, S>(mut self, defaulted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaulted_targets = defaulted.into_iter().map(Into::into).collect();
        self
    }

    /// Converter pinned for the named target, if any.
    pub(crate) fn converter_for(&self, target: &str) -> Option<&str> {
        self.explicit_converters
            .iter()
            .find(|c| c.target_name == target)
            .map(|c| c.converter_name.as_str())
    }
}

/// Pool bookkeeping shared by the phases.
///
/// Indexes refer to `MappingRequest::targets` and `MappingRequest::sources`.
struct Resolution {
    mapped: Vec<Option<PropertyMapping>>,
    consumed: Vec<bool>,
}

impl Resolution {
    fn new(request: &MappingRequest) -> Self {
        Self {
            mapped: vec![None; request.targets.len()],
            consumed: vec![false; request.sources.len()],
        }
    }

    fn commit(&mut self, target: usize, source: usize, mapping: PropertyMapping) {
        self.mapped[target] = Some(mapping);
        self.consumed[source] = true;
    }

    fn unmapped_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.mapped
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(i, _)| i)
    }

    fn available_sources<'r>(
        &'r self,
        request: &'r MappingRequest,
    ) -> impl Iterator<Item = (usize, &'r Source)> + 'r {
        request
            .sources
            .iter()
            .enumerate()
            .filter(|(i, s)| !self.consumed[*i] && !s.is_lifted())
    }

    fn mapped_count(&self) -> usize {
        self.mapped.iter().filter(|m| m.is_some()).count()
    }

    fn into_mappings(self) -> Vec<PropertyMapping> {
        self.mapped.into_iter().flatten().collect()
    }
}

/// Resolve the per-target mappings of one function.
///
/// Returns the mappings in target declaration order; targets left to their
/// default value are absent.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn calculate_mappings(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
) -> Result<Vec<PropertyMapping>, MappingError> {
    validate::validate(request, matcher)?;

    let mut resolution = Resolution::new(request);

    explicit::resolve_explicit(request, matcher, &mut resolution)?;
    debug!(mapped = resolution.mapped_count(), "explicit mappings resolved");

    implicit::resolve_by_name(request, matcher, &mut resolution)?;
    debug!(mapped = resolution.mapped_count(), "name matches resolved");

    implicit::resolve_by_type(request, matcher, &mut resolution)?;
    debug!(mapped = resolution.mapped_count(), "type matches resolved");

    complete::check_complete(request, &resolution)?;

    Ok(resolution.into_mappings())
}
