//! Type compatibility and conversion resolution.
//!
//! This module decides whether, and how, a value of one type can feed a slot
//! of another type.
//!
//! ## Conversion Priority
//!
//! Strategies are tried in this order; the first that succeeds wins:
//! 1. Direct assignment (aliases, nullability flow, parameters recursively)
//! 2. A single conversion function from the pool
//! 3. Null-safe unwrap of a nullable source into a nullable slot
//! 4. Element-wise mapping between single-parameter collections
//!
//! Steps 3 and 4 restart the whole chain on the unwrapped or element types,
//! so `List<A>?` reaches `List<B>?` through both of them and a converter.
//!
//! # Example
//!
//! ```
//! use kewt_core::{ConversionFunction, Parameter, TypeRef};
//! use kewt_mapper::TypeMatcher;
//! use kewt_registry::AliasRegistry;
//!
//! let aliases = AliasRegistry::with_defaults();
//! let pool = vec![ConversionFunction::new(
//!     "toText",
//!     Parameter::new("x", TypeRef::new("kotlin.Int")),
//!     TypeRef::new("kotlin.String"),
//! )];
//! let matcher = TypeMatcher::new(&aliases, &pool);
//!
//! let list = |t: TypeRef| TypeRef::new("kotlin.collections.List").with_params(vec![t]);
//! let ctx = matcher
//!     .find_conversion(&list(TypeRef::new("kotlin.Int")), &list(TypeRef::new("kotlin.String")), None)
//!     .unwrap()
//!     .unwrap();
//! assert!(ctx.uses_element_mapping);
//! assert_eq!(ctx.conversion_function.unwrap().name, "toText");
//! ```

mod assign;
mod function;

pub use assign::is_assignable;
pub use function::find_function_conversion;

use kewt_core::{AmbiguityError, ConversionContext, ConversionFunction, Nullability, TypeRef};
use kewt_registry::AliasRegistry;
use tracing::trace;

/// Conversion resolver over an alias table and a conversion-function pool.
///
/// Borrowed views only; one matcher is built per analysed mapping unit.
#[derive(Debug, Clone, Copy)]
pub struct TypeMatcher<'a> {
    aliases: &'a AliasRegistry,
    functions: &'a [ConversionFunction],
}

impl<'a> TypeMatcher<'a> {
    pub fn new(aliases: &'a AliasRegistry, functions: &'a [ConversionFunction]) -> Self {
        Self { aliases, functions }
    }

    pub fn aliases(&self) -> &'a AliasRegistry {
        self.aliases
    }

    pub fn functions(&self) -> &'a [ConversionFunction] {
        self.functions
    }

    /// Whether any function in the pool carries this name.
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.name == name)
    }

    /// Check if `from` is directly assignable to `to`.
    pub fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        is_assignable(from, to, self.aliases)
    }

    /// Find how a `from` value can become a `to` value.
    ///
    /// Returns `Ok(None)` when no strategy applies. `explicit_converter`
    /// restricts step 2 to functions of that name; it is carried into the
    /// recursive unwrap and element steps.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn find_conversion(
        &self,
        from: &TypeRef,
        to: &TypeRef,
        explicit_converter: Option<&str>,
    ) -> Result<Option<ConversionContext>, AmbiguityError> {
        // 1. Direct assignment
        if self.is_assignable(from, to) {
            trace!(%from, %to, "assignable");
            return Ok(Some(ConversionContext::direct()));
        }

        // 2. Conversion function
        if let Some(function) =
            find_function_conversion(from, to, explicit_converter, self.functions, self.aliases)?
        {
            trace!(%from, %to, function = %function.name, "via conversion function");
            return Ok(Some(ConversionContext::via(function)));
        }

        // 3. Null-safe unwrap
        if from.nullability == Nullability::Nullable
            && matches!(to.nullability, Nullability::Nullable | Nullability::Platform)
        {
            let unwrapped = from.clone().with_nullability(Nullability::NonNull);
            return Ok(self
                .find_conversion(&unwrapped, to, explicit_converter)?
                .map(ConversionContext::with_null_safe_unwrap));
        }

        // 4. Element-wise collection mapping
        if let (Some(from_element), Some(to_element)) = (self.element_of(from), self.element_of(to))
            && self.is_assignable(&from.bare(), &to.bare())
        {
            return Ok(self
                .find_conversion(from_element, to_element, explicit_converter)?
                .map(ConversionContext::with_element_mapping));
        }

        Ok(None)
    }

    fn element_of<'t>(&self, ty: &'t TypeRef) -> Option<&'t TypeRef> {
        if self.aliases.is_collection(ty) {
            ty.single_param()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use kewt_core::Parameter;

    use super::*;

    fn list(element: TypeRef) -> TypeRef {
        TypeRef::new("kotlin.collections.List").with_params(vec![element])
    }

    fn convert(name: &str, from: TypeRef, to: TypeRef) -> ConversionFunction {
        ConversionFunction::new(name, Parameter::new("x", from), to)
    }

    fn int() -> TypeRef {
        TypeRef::new("kotlin.Int")
    }

    fn string() -> TypeRef {
        TypeRef::new("kotlin.String")
    }

    #[test]
    fn direct_beats_function() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("copy", string(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let ctx = matcher.find_conversion(&string(), &string(), None).unwrap();
        assert_eq!(ctx, Some(ConversionContext::direct()));
    }

    #[test]
    fn function_conversion() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let ctx = matcher.find_conversion(&int(), &string(), None).unwrap().unwrap();
        assert_eq!(ctx.conversion_function.map(|f| f.name), Some("toText".into()));
        assert!(!ctx.uses_element_mapping);
        assert!(!ctx.uses_null_safe_unwrap);
    }

    #[test]
    fn nullable_unwrap_through_function() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let ctx = matcher
            .find_conversion(&int().nullable(), &string().nullable(), None)
            .unwrap()
            .unwrap();
        assert!(ctx.uses_null_safe_unwrap);
        assert_eq!(ctx.conversion_function.map(|f| f.name), Some("toText".into()));
    }

    #[test]
    fn nullable_into_non_null_fails() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        assert_eq!(matcher.find_conversion(&int().nullable(), &string(), None).unwrap(), None);
        assert_eq!(matcher.find_conversion(&int().nullable(), &int(), None).unwrap(), None);
    }

    #[test]
    fn element_mapping_without_converter() {
        let aliases = AliasRegistry::with_defaults();
        let matcher = TypeMatcher::new(&aliases, &[]);

        let from = list(TypeRef::new("java.lang.Integer"));
        let ctx = matcher.find_conversion(&from, &list(int()), None).unwrap();
        assert_eq!(ctx, Some(ConversionContext::direct()));

        let ctx = matcher.find_conversion(&list(int()), &list(string()), None).unwrap();
        assert_eq!(ctx, None);
    }

    #[test]
    fn element_mapping_with_converter() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let to = TypeRef::new("kotlin.collections.MutableList").with_params(vec![string()]);
        let ctx = matcher.find_conversion(&list(int()), &to, None).unwrap().unwrap();
        assert!(ctx.uses_element_mapping);
        assert!(!ctx.uses_null_safe_unwrap);
        assert_eq!(ctx.conversion_function.map(|f| f.name), Some("toText".into()));
    }

    #[test]
    fn nullable_list_of_convertible_elements() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let ctx = matcher
            .find_conversion(&list(int()).nullable(), &list(string()).nullable(), None)
            .unwrap()
            .unwrap();
        assert!(ctx.uses_null_safe_unwrap);
        assert!(ctx.uses_element_mapping);
    }

    #[test]
    fn list_and_set_do_not_mix() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![convert("toText", int(), string())];
        let matcher = TypeMatcher::new(&aliases, &pool);

        let set = TypeRef::new("kotlin.collections.Set").with_params(vec![string()]);
        assert_eq!(matcher.find_conversion(&list(int()), &set, None).unwrap(), None);
    }

    #[test]
    fn explicit_converter_reaches_elements() {
        let aliases = AliasRegistry::with_defaults();
        let pool = vec![
            convert("toText", int(), string()),
            convert("toHex", int(), string()),
        ];
        let matcher = TypeMatcher::new(&aliases, &pool);

        assert!(matcher.find_conversion(&list(int()), &list(string()), None).is_err());

        let ctx = matcher
            .find_conversion(&list(int()), &list(string()), Some("toHex"))
            .unwrap()
            .unwrap();
        assert_eq!(ctx.conversion_function.map(|f| f.name), Some("toHex".into()));
    }
}
