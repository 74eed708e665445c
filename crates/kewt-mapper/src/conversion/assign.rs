//! Direct assignability.
//!
//! A value of type `from` can be assigned to a slot of type `to` without any
//! conversion when:
//!
//! 1. the bare names are equal or aliases of each other,
//! 2. nullability flows (see [`kewt_core::Nullability::flows_into`]),
//! 3. type parameters have the same arity and are pairwise assignable.

use kewt_core::TypeRef;
use kewt_registry::AliasRegistry;

/// Check if `from` is directly assignable to `to`.
pub fn is_assignable(from: &TypeRef, to: &TypeRef, aliases: &AliasRegistry) -> bool {
    aliases.are_aliases(&from.name, &to.name)
        && from.nullability.flows_into(to.nullability)
        && from.type_parameters.len() == to.type_parameters.len()
        && from
            .type_parameters
            .iter()
            .zip(&to.type_parameters)
            .all(|(a, b)| is_assignable(a, b, aliases))
}
