//! Property resolution and its memo cache.
//!
//! [`PropertyResolver`] is the seam between the mapping engine and whatever
//! knows the shape of types. [`PropertyCache`] wraps any resolver with a
//! shared, thread-safe memo keyed by bare qualified name.
//!
//! Resolution is lazy and one level deep: resolving `Person` yields its
//! properties and their types, never the properties of those types. A
//! resolver that re-enters the cache for a type it is already resolving on the
//! same thread gets [`ResolveError::Cycle`] instead of recursing forever.

use std::sync::{Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use kewt_core::{
    Nullability, Property, PropertyDiscoveryStrategy, QualifiedName, ResolveError, ResolvedType,
    TypeRef,
};

/// Source of property sets.
pub trait PropertyResolver: Send + Sync {
    /// Properties of `ty`, one level deep.
    fn resolve(&self, ty: &TypeRef) -> Result<ResolvedType, ResolveError>;

    /// Type reached by walking `path` from a value of type `ty`.
    ///
    /// Returns `Ok(None)` when a segment names no property. If the starting
    /// value or any intermediate property is nullable, so is the result.
    fn property_type_at(
        &self,
        ty: &TypeRef,
        path: &[String],
    ) -> Result<Option<TypeRef>, ResolveError> {
        let mut current = ty.clone();
        let mut through_nullable = false;
        for segment in path {
            through_nullable |= current.is_nullable();
            let resolved = self.resolve(&current)?;
            match resolved.property(segment) {
                Some(property) => current = property.ty.clone(),
                None => return Ok(None),
            }
        }
        if through_nullable {
            current = current.with_nullability(Nullability::Nullable);
        }
        Ok(Some(current))
    }
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for &R {
    fn resolve(&self, ty: &TypeRef) -> Result<ResolvedType, ResolveError> {
        (**self).resolve(ty)
    }
}

type Entry = (Vec<Property>, PropertyDiscoveryStrategy);

/// Memoizing wrapper around a [`PropertyResolver`].
///
/// Safe to share between threads. Concurrent first requests for the same type
/// may both reach the inner resolver; only the first result is kept, so every
/// caller observes the same property set.
pub struct PropertyCache<R> {
    inner: R,
    memo: RwLock<FxHashMap<QualifiedName, Entry>>,
    in_flight: Mutex<FxHashSet<(ThreadId, QualifiedName)>>,
}

impl<R: PropertyResolver> PropertyCache<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            memo: RwLock::new(FxHashMap::default()),
            in_flight: Mutex::new(FxHashSet::default()),
        }
    }

    /// The wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of memoized types.
    pub fn cached_len(&self) -> usize {
        self.memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop every memoized entry.
    pub fn clear(&self) {
        self.memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(&self, name: &QualifiedName) -> Option<Entry> {
        self.memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn enter(&self, name: &QualifiedName) -> Result<InFlightGuard<'_>, ResolveError> {
        let key = (thread::current().id(), name.clone());
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            return Err(ResolveError::Cycle(name.to_string()));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            key,
        })
    }
}

impl<R: PropertyResolver> PropertyResolver for PropertyCache<R> {
    fn resolve(&self, ty: &TypeRef) -> Result<ResolvedType, ResolveError> {
        if let Some((properties, strategy)) = self.cached(&ty.name) {
            trace!(ty = %ty.name, "property cache hit");
            return Ok(ResolvedType {
                ty: ty.clone(),
                properties,
                strategy,
            });
        }

        let _guard = self.enter(&ty.name)?;
        let resolved = self.inner.resolve(ty)?;
        debug!(
            ty = %ty.name,
            properties = resolved.properties.len(),
            strategy = %resolved.strategy,
            "resolved properties"
        );

        let (properties, strategy) = self
            .memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(ty.name.clone())
            .or_insert((resolved.properties, resolved.strategy))
            .clone();

        Ok(ResolvedType {
            ty: ty.clone(),
            properties,
            strategy,
        })
    }
}

struct InFlightGuard<'a> {
    set: &'a Mutex<FxHashSet<(ThreadId, QualifiedName)>>,
    key: (ThreadId, QualifiedName),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
