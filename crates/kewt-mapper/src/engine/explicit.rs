//! Phase 1: explicit mappings.

use tracing::trace;

use kewt_core::{ConfigurationError, MappingError, PropertyMapping};

use super::{MappingRequest, Resolution};
use crate::conversion::TypeMatcher;

/// Commit every target named by a name mapping to its exact source.
///
/// Runs after validation, so each mapping names an existing source and target
/// and no target is named twice.
pub(super) fn resolve_explicit(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
    resolution: &mut Resolution,
) -> Result<(), MappingError> {
    for (target_index, target) in request.targets.iter().enumerate() {
        let Some(mapping) = request
            .name_mappings
            .iter()
            .find(|m| m.target_name == target.name)
        else {
            continue;
        };
        let Some((source_index, source)) = request
            .sources
            .iter()
            .enumerate()
            .find(|(_, s)| s.is_at(&mapping.parameter_name, &mapping.source_path))
        else {
            continue;
        };

        let converter = request.converter_for(&target.name);
        let conversion = matcher
            .find_conversion(&source.ty, &target.ty, converter)?
            .ok_or_else(|| ConfigurationError::IncompatibleExplicitMapping {
                mapped: source.clone(),
                target: target.clone(),
            })?;

        let mapping = PropertyMapping {
            source: source.clone(),
            target: target.clone(),
            conversion,
        };
        trace!(%mapping, "explicit mapping");
        resolution.commit(target_index, source_index, mapping);
    }
    Ok(())
}
