//! Phase 4: completion check.

use kewt_core::{ConfigurationError, MappingError, Parameter, Source, UnresolvedMappingError};

use super::{MappingRequest, Resolution};

pub(super) fn check_complete(
    request: &MappingRequest,
    resolution: &Resolution,
) -> Result<(), MappingError> {
    let stuck: Vec<Parameter> = resolution
        .unmapped_targets()
        .map(|i| &request.targets[i])
        .filter(|t| !request.defaulted_targets.contains(&t.name))
        .cloned()
        .collect();
    if !stuck.is_empty() {
        return Err(UnresolvedMappingError { targets: stuck }.into());
    }

    let unconsumed: Vec<Source> = request
        .sources
        .iter()
        .zip(&resolution.consumed)
        .filter(|(s, consumed)| s.is_lifted() && !**consumed)
        .map(|(s, _)| s.clone())
        .collect();
    if !unconsumed.is_empty() {
        return Err(ConfigurationError::LiftedSourceNotConsumed {
            sources: unconsumed,
        }
        .into());
    }

    Ok(())
}
