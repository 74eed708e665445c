//! Phase 0: validation of explicit configuration.

use rustc_hash::{FxHashMap, FxHashSet};

use kewt_core::{ConfigurationError, ExplicitConverter, NameMapping};

use super::MappingRequest;
use crate::conversion::TypeMatcher;

pub(super) fn validate(
    request: &MappingRequest,
    matcher: &TypeMatcher<'_>,
) -> Result<(), ConfigurationError> {
    check_duplicate_targets(&request.name_mappings)?;

    let not_existing_sources = dedup(
        request
            .name_mappings
            .iter()
            .filter(|m| {
                !request
                    .sources
                    .iter()
                    .any(|s| s.is_at(&m.parameter_name, &m.source_path))
            })
            .map(NameMapping::selector),
    );
    if !not_existing_sources.is_empty() {
        return Err(ConfigurationError::NotExistingSources {
            selectors: not_existing_sources,
        });
    }

    let is_target = |name: &str| request.targets.iter().any(|t| t.name == name);
    let not_existing_targets = dedup(
        request
            .name_mappings
            .iter()
            .map(|m| m.target_name.as_str())
            .chain(
                request
                    .explicit_converters
                    .iter()
                    .map(|c| c.target_name.as_str()),
            )
            .filter(|name| !is_target(*name))
            .map(str::to_string),
    );
    if !not_existing_targets.is_empty() {
        return Err(ConfigurationError::NotExistingTargets {
            targets: not_existing_targets,
        });
    }

    let unknown_converters: Vec<ExplicitConverter> = request
        .explicit_converters
        .iter()
        .filter(|c| !matcher.has_function(&c.converter_name))
        .cloned()
        .collect();
    if !unknown_converters.is_empty() {
        return Err(ConfigurationError::UnknownConverters {
            converters: unknown_converters,
        });
    }

    Ok(())
}

fn check_duplicate_targets(mappings: &[NameMapping]) -> Result<(), ConfigurationError> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for mapping in mappings {
        *counts.entry(mapping.target_name.as_str()).or_default() += 1;
    }

    let duplicates: Vec<NameMapping> = mappings
        .iter()
        .filter(|m| counts[m.target_name.as_str()] > 1)
        .cloned()
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::DuplicateTargetMapping {
            mappings: duplicates,
        })
    }
}

/// Drop repeats, keeping first-seen order.
fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    items.filter(|item| seen.insert(item.clone())).collect()
}
