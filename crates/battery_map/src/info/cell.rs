//! Process-wide storage of descriptors.
//!
//! A descriptor is built on the first mapping call that needs it and shared
//! by every later call, in every thread.
//!
//! ## NonGenericDescriptorCell
//!
//! For non generic destination types. Internally an [`OnceLock`].
//!
//! ## GenericDescriptorCell
//!
//! If the type is generic, the `static CELL` inside `descriptor()` is shared
//! by every instantiation. The cell therefore keeps a [`TypeIdMap`] behind a
//! [`RwLock`] and stores leaked descriptors by `TypeId`.
//!
//! Two threads may build the same descriptor concurrently. Both results are
//! equal, the first one inserted is kept.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use battery_utils::TypeIdMap;

use crate::info::Descriptor;

// -----------------------------------------------------------------------------
// NonGenericDescriptorCell

/// Static storage of the descriptor of a non generic type.
///
/// ## Example
///
/// ```
/// use battery_map::info::{Descriptor, NonGenericDescriptorCell};
///
/// struct Ping;
///
/// fn descriptor() -> &'static Descriptor<Ping> {
///     static CELL: NonGenericDescriptorCell<Ping> = NonGenericDescriptorCell::new();
///     CELL.get_or_init(|| Descriptor::new([]))
/// }
///
/// assert!(core::ptr::eq(descriptor(), descriptor()));
/// assert_eq!(descriptor().len(), 0);
/// ```
pub struct NonGenericDescriptorCell<O: 'static>(OnceLock<Descriptor<O>>);

impl<O: 'static> NonGenericDescriptorCell<O> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> Descriptor<O>) -> &Descriptor<O> {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Static storage of the descriptors of every instantiation of a generic type.
///
/// ## Example
///
/// ```
/// use battery_map::info::{Descriptor, GenericDescriptorCell};
///
/// struct Page<T>(Vec<T>);
///
/// fn descriptor<T: 'static>() -> &'static Descriptor<Page<T>> {
///     static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
///     CELL.get_or_insert::<Page<T>>(|| Descriptor::new([]))
/// }
///
/// assert!(descriptor::<u8>().type_path().ends_with("Page<u8>"));
/// assert!(descriptor::<String>().type_path().ends_with("Page<alloc::string::String>"));
/// ```
pub struct GenericDescriptorCell(RwLock<TypeIdMap<&'static (dyn Any + Send + Sync)>>);

impl GenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor of `O`, building it with `f` on first use.
    pub fn get_or_insert<O: 'static>(&self, f: impl FnOnce() -> Descriptor<O>) -> &Descriptor<O> {
        let type_id = TypeId::of::<O>();
        let stored = match self.get_by_type_id(type_id) {
            Some(stored) => stored,
            None => self.insert_by_type_id(type_id, Box::new(f())),
        };
        match stored.downcast_ref::<Descriptor<O>>() {
            Some(descriptor) => descriptor,
            // Entries are only inserted under the `TypeId` of their owner.
            None => unreachable!("descriptor stored under a foreign `TypeId`"),
        }
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static (dyn Any + Send + Sync)> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert_by_type_id(
        &self,
        type_id: TypeId,
        value: Box<dyn Any + Send + Sync>,
    ) -> &'static (dyn Any + Send + Sync) {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(value))
    }
}

#[cfg(test)]
mod tests {
    use super::GenericDescriptorCell;
    use crate::info::Descriptor;

    struct Wrapper<T>(T);

    fn descriptor<T: 'static>() -> &'static Descriptor<Wrapper<T>> {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Wrapper<T>>(|| Descriptor::new([]))
    }

    #[test]
    fn one_descriptor_per_instantiation() {
        let a = descriptor::<u32>();
        let b = descriptor::<i64>();

        assert!(core::ptr::eq(a, descriptor::<u32>()));
        assert_ne!(a.type_path(), b.type_path());
    }

    #[test]
    fn concurrent_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| descriptor::<u16>() as *const _ as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
