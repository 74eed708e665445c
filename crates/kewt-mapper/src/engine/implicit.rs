//! Phases 2 and 3: implicit matching by name, then by type.

use tracing::trace;

use kewt_core::{AmbiguityError, AmbiguousTarget, MappingError, PropertyMapping};

use super::{MappingRequest, Resolution};
use crate::conversion::TypeMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Source terminal name must equal the target name.
    ByName,
    /// Any available source.
    ByType,
}

pub(super) fn resolve_by_name(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
    resolution: &mut Resolution,
) -> Result<(), MappingError> {
    resolve_phase(request, matcher, resolution, Match::ByName)
}

pub(super) fn resolve_by_type(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
    resolution: &mut Resolution,
) -> Result<(), MappingError> {
    resolve_phase(request, matcher, resolution, Match::ByType)
}

/// A target with exactly one viable source.
struct Pick {
    target: usize,
    source: usize,
    mapping: PropertyMapping,
}

/// Match every unmapped target against the pool left by earlier phases.
///
/// All targets of the phase see the same pool, so one source may feed several
/// targets. Picks are committed together once the phase is known to be
/// unambiguous.
fn resolve_phase(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
    resolution: &mut Resolution,
    mode: Match,
) -> Result<(), MappingError> {
    let mut picks: Vec<Pick> = Vec::new();
    let mut ambiguous: Vec<AmbiguousTarget> = Vec::new();

    for target_index in resolution.unmapped_targets() {
        let target = &request.targets[target_index];
        let converter = request.converter_for(&target.name);

        let mut candidates: Vec<(usize, PropertyMapping)> = Vec::new();
        for (source_index, source) in resolution.available_sources(request) {
            if mode == Match::ByName && source.terminal_name() != target.name {
                continue;
            }
            match matcher.find_conversion(&source.ty, &target.ty, converter)? {
                Some(conversion) => {
                    let mapping = PropertyMapping {
                        source: source.clone(),
                        target: target.clone(),
                        conversion,
                    };
                    trace!(?mode, %mapping, "matched");
                    candidates.push((source_index, mapping));
                }
                None => trace!(?mode, %target, %source, "not matched"),
            }
        }

        match candidates.len() {
            0 => {}
            1 => {
                let (source_index, mapping) = candidates.remove(0);
                picks.push(Pick {
                    target: target_index,
                    source: source_index,
                    mapping,
                });
            }
            _ => ambiguous.push(AmbiguousTarget {
                target: target.clone(),
                candidates: candidates.into_iter().map(|(_, m)| m).collect(),
            }),
        }
    }

    if !ambiguous.is_empty() {
        return Err(AmbiguityError::Mapping { targets: ambiguous }.into());
    }

    for pick in picks {
        resolution.commit(pick.target, pick.source, pick.mapping);
    }
    Ok(())
}
