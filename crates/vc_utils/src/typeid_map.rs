use core::any::TypeId;
use core::fmt;

use crate::hash::IdHashState;
use crate::hash::hashbrown::HashMap;

/// A map from [`TypeId`] to `V`.
///
/// A `TypeId` is already a good hash, so keys go through [`IdHashState`]
/// untouched. The map is `const`-constructible for use in statics.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.get_or_insert_with(TypeId::of::<u8>(), || "byte");
/// *map.get_or_insert_with(TypeId::of::<u8>(), || "unused") = "octet";
///
/// assert_eq!(map.get_type::<u8>(), Some(&"octet"));
/// assert!(map.get(&TypeId::of::<u16>()).is_none());
/// assert_eq!(map.len(), 1);
/// ```
pub struct TypeIdMap<V> {
    entries: HashMap<TypeId, V, IdHashState>,
}

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: HashMap::with_hasher(IdHashState),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.entries.get(type_id)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.entries.get(&TypeId::of::<T>())
    }

    /// Returns the entry of `type_id`, calling `make` only if it is missing.
    #[inline]
    pub fn get_or_insert_with(&mut self, type_id: TypeId, make: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(type_id).or_insert_with(make)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.entries).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn make_runs_once_per_key() {
        let mut map = TypeIdMap::new();
        let mut calls = 0;
        for _ in 0..3 {
            map.get_or_insert_with(TypeId::of::<str>(), || {
                calls += 1;
                calls
            });
        }
        map.get_or_insert_with(TypeId::of::<[u8]>(), || 10);

        assert_eq!(calls, 1);
        assert_eq!(map.get_type::<str>(), Some(&1));
        assert_eq!(map.get_type::<[u8]>(), Some(&10));
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
    }
}
