use core::any::TypeId;
use core::fmt;

use crate::hash::{HashMap, TypeIdHashState};

/// Values keyed by [`TypeId`].
///
/// Adapter tables and the storage of generic descriptors are both keyed by
/// the type they describe; this wraps a [`HashMap`] with a pass-through
/// hasher and typed accessors.
///
/// # Examples
///
/// ```
/// use battery_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::<&'static str>::new();
/// map.insert_type::<u32>("integer");
///
/// assert_eq!(map.get_type::<u32>(), Some(&"integer"));
/// assert!(!map.contains_type::<String>());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, TypeIdHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(TypeIdHashState::new()))
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns the value of `type_id`, inserting `f()` first if missing.
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    /// Inserts `value`, returning the one it replaces.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, value: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), value)
    }

    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.values()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn get_or_insert_builds_once() {
        let mut map = TypeIdMap::<u32>::new();
        let mut calls = 0;

        *map.get_or_insert(TypeId::of::<u8>(), || {
            calls += 1;
            1
        }) += 10;
        let value = *map.get_or_insert(TypeId::of::<u8>(), || {
            calls += 1;
            100
        });

        assert_eq!(value, 11);
        assert_eq!(calls, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insert_replaces() {
        let mut map = TypeIdMap::<&str>::default();
        assert!(map.is_empty());

        assert_eq!(map.insert_type::<i64>("long"), None);
        assert_eq!(map.insert_type::<i64>("i64"), Some("long"));
        assert_eq!(map.get(&TypeId::of::<i64>()), Some(&"i64"));
        assert!(!map.contains_type::<u64>());
    }
}
