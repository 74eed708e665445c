//! Explicit-mapping normalization.
//!
//! User directives name sources with dotted selectors (`person.name.first`).
//! Normalization splits them into `(parameter, path)` pairs and separates the
//! pinned converters.
//!
//! ## Shorthand
//!
//! When a function has exactly one source parameter and no directive spells
//! that parameter out, every selector is taken relative to it: `name.first`
//! means `person.name.first`.
//!
//! ## Selector forms
//!
//! - `param` (multi-parameter functions): the whole parameter
//! - `param.a.b`: the property path `a.b` of `param`
//! - empty, with a converter: pins the converter only, the source is inferred

use kewt_core::{ConfigurationError, ExplicitConverter, NameMapping, Parameter};

/// One user-declared override: `source -> target`, optionally through `converter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingDirective {
    pub source: String,
    pub target: String,
    pub converter: Option<String>,
}

impl MappingDirective {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            converter: None,
        }
    }

    /// Pin a converter for `target` without fixing its source.
    pub fn converter_only(target: impl Into<String>, converter: impl Into<String>) -> Self {
        Self {
            source: String::new(),
            target: target.into(),
            converter: Some(converter.into()),
        }
    }

    #[must_use]
    pub fn via(mut self, converter: impl Into<String>) -> Self {
        self.converter = Some(converter.into());
        self
    }

    fn invalid(&self, reason: &str) -> ConfigurationError {
        ConfigurationError::InvalidDirective {
            selector: self.source.clone(),
            target: self.target.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Normalized form of a function's directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDirectives {
    pub name_mappings: Vec<NameMapping>,
    pub explicit_converters: Vec<ExplicitConverter>,
}

/// Split directives into name mappings and explicit converters.
///
/// `sources` are the parameters that may be read from; the merge-target
/// parameter is not among them.
pub fn normalize_directives(
    sources: &[Parameter],
    directives: &[MappingDirective],
) -> Result<NormalizedDirectives, ConfigurationError> {
    let shorthand_for = match sources {
        [single] if !directives.iter().any(|d| names_parameter(&d.source, &single.name)) => {
            Some(single.name.as_str())
        }
        _ => None,
    };

    let mut normalized = NormalizedDirectives::default();
    for directive in directives {
        if directive.target.is_empty() {
            return Err(directive.invalid("empty target"));
        }

        if let Some(converter) = &directive.converter {
            if normalized
                .explicit_converters
                .iter()
                .any(|c| c.target_name == directive.target)
            {
                return Err(directive.invalid("more than one converter for the same target"));
            }
            normalized
                .explicit_converters
                .push(ExplicitConverter::new(&directive.target, converter));
        }

        if directive.source.is_empty() {
            if directive.converter.is_none() {
                return Err(directive.invalid("empty source without converter"));
            }
            continue;
        }

        let segments: Vec<&str> = directive.source.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(directive.invalid("empty selector segment"));
        }

        let mapping = match shorthand_for {
            Some(parameter) => NameMapping::new(
                parameter,
                segments.iter().map(|s| s.to_string()).collect(),
                &directive.target,
            ),
            None => NameMapping::new(
                segments[0],
                segments[1..].iter().map(|s| s.to_string()).collect(),
                &directive.target,
            ),
        };
        normalized.name_mappings.push(mapping);
    }

    Ok(normalized)
}

fn names_parameter(selector: &str, parameter: &str) -> bool {
    selector == parameter
        || selector
            .strip_prefix(parameter)
            .is_some_and(|rest| rest.starts_with('.'))
}
