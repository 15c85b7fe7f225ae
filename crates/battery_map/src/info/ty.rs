use core::any::{TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Value;

/// A type identity together with its generic arguments.
///
/// # Examples
///
/// ```
/// use battery_map::info::Type;
///
/// let ty = Type::of::<Vec<Option<i64>>>();
/// assert!(ty.is::<Vec<Option<i64>>>());
/// assert_eq!(ty.raw_path(), "alloc::vec::Vec");
/// assert!(ty.args()[0].is::<Option<i64>>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    args: fn() -> Vec<Type>,
}

impl Type {
    /// Returns the [`Type`] of `T`.
    #[inline]
    pub fn of<T: Value>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
            args: T::type_args,
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full type path, generic arguments included.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The type path without generic arguments.
    pub fn raw_path(&self) -> &'static str {
        self.path.split_once('<').map_or(self.path, |(raw, _)| raw)
    }

    /// The generic arguments, in declaration order.
    #[inline]
    pub fn args(&self) -> Vec<Type> {
        (self.args)()
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}
