//! Conversion through a user-supplied function.

use kewt_core::{AmbiguityError, ConversionFunction, TypeRef};
use kewt_registry::AliasRegistry;
use tracing::trace;

use super::assign::is_assignable;

/// Find the single conversion function able to turn `from` into `to`.
///
/// With `explicit` set, only functions of that name are considered. More than
/// one qualifying function is an ambiguity, even when they share the explicit
/// name.
pub fn find_function_conversion(
    from: &TypeRef,
    to: &TypeRef,
    explicit: Option<&str>,
    functions: &[ConversionFunction],
    aliases: &AliasRegistry,
) -> Result<Option<ConversionFunction>, AmbiguityError> {
    let mut candidates: Vec<&ConversionFunction> = functions
        .iter()
        .filter(|f| explicit.is_none_or(|name| f.name == name))
        .filter(|f| {
            let fits = is_assignable(from, &f.parameter.ty, aliases)
                && is_assignable(&f.return_type, to, aliases);
            trace!(function = %f, %from, %to, fits, "conversion candidate");
            fits
        })
        .collect();

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop().cloned()),
        _ => Err(AmbiguityError::Conversion {
            from: from.clone(),
            to: to.clone(),
            candidates: candidates.into_iter().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use kewt_core::Parameter;

    use super::*;

    fn convert(name: &str, from: &str, to: &str) -> ConversionFunction {
        ConversionFunction::new(name, Parameter::new("x", TypeRef::new(from)), TypeRef::new(to))
    }

    #[test]
    fn single_candidate() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![
            convert("toDate", "kotlin.String", "java.time.LocalDate"),
            convert("toId", "kotlin.String", "java.util.UUID"),
        ];
        let found = find_function_conversion(
            &TypeRef::new("kotlin.String"),
            &TypeRef::new("java.util.UUID"),
            None,
            &pool,
            &aliases,
        )
        .unwrap();
        assert_eq!(found.map(|f| f.name), Some("toId".to_string()));
    }

    #[test]
    fn several_candidates_are_ambiguous() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![
            convert("parse", "kotlin.String", "kotlin.Int"),
            convert("length", "java.lang.String", "int"),
        ];
        let err = find_function_conversion(
            &TypeRef::new("kotlin.String"),
            &TypeRef::new("kotlin.Int"),
            None,
            &pool,
            &aliases,
        )
        .unwrap_err();
        let AmbiguityError::Conversion { candidates, .. } = err else {
            panic!("expected conversion ambiguity");
        };
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn explicit_name_filters() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![
            convert("parse", "kotlin.String", "kotlin.Int"),
            convert("length", "kotlin.String", "kotlin.Int"),
        ];
        let found = find_function_conversion(
            &TypeRef::new("kotlin.String"),
            &TypeRef::new("kotlin.Int"),
            Some("length"),
            &pool,
            &aliases,
        )
        .unwrap();
        assert_eq!(found.map(|f| f.name), Some("length".to_string()));
    }

    #[test]
    fn nullable_return_does_not_fit_non_null_target() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![ConversionFunction::new(
            "maybe",
            Parameter::new("x", TypeRef::new("kotlin.String")),
            TypeRef::new("kotlin.Int").nullable(),
        )];
        let found = find_function_conversion(
            &TypeRef::new("kotlin.String"),
            &TypeRef::new("kotlin.Int"),
            None,
            &pool,
            &aliases,
        )
        .unwrap();
        assert!(found.is_none());
    }
}
