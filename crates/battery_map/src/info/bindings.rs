use crate::Value;
use crate::info::{Declared, MemberInfo, Type};

// -----------------------------------------------------------------------------
// TypeBindings

/// The generic arguments in effect while visiting one object.
///
/// A context holds every argument collected on the way down from the root,
/// and a `base` marking where the arguments of the current object start.
/// A member declared as type parameter `i` binds to `entries[base + i]`.
///
/// Each nested object gets a new context through [`TypeBindings::extend`]:
/// the parent's entries followed by the nested type's own arguments. The
/// parent is never modified, so siblings cannot observe each other.
///
/// Substitution itself already happened at compile time through
/// monomorphization; the context describes it for diagnostics and keeps
/// member resolution observable.
///
/// # Examples
///
/// ```
/// use battery_map::info::{Type, TypeBindings};
///
/// let root = TypeBindings::root::<Vec<u8>>();
/// assert!(root.param(0).unwrap().is::<u8>());
///
/// let child = root.extend(vec![Type::of::<String>()]);
/// assert!(child.param(0).unwrap().is::<String>());
/// assert_eq!(child.entries().len(), 2);
/// assert_eq!(root.entries().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeBindings {
    entries: Vec<Type>,
    base: usize,
}

/// A member type after generic substitution.
#[derive(Debug, Clone)]
pub struct Resolved {
    ty: Type,
    bindings: TypeBindings,
}

impl TypeBindings {
    /// A context without any argument.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
            base: 0,
        }
    }

    /// The context of a call-site instantiation of `O`.
    #[inline]
    pub fn root<O: Value>() -> Self {
        Self {
            entries: O::type_args(),
            base: 0,
        }
    }

    /// All collected arguments, outermost first.
    #[inline]
    pub fn entries(&self) -> &[Type] {
        &self.entries
    }

    /// The arguments of the current object.
    #[inline]
    pub fn params(&self) -> &[Type] {
        &self.entries[self.base..]
    }

    /// The argument bound to type parameter `index` of the current object.
    #[inline]
    pub fn param(&self, index: usize) -> Option<Type> {
        self.params().get(index).copied()
    }

    /// Returns a child context: these entries followed by `args`.
    pub fn extend(&self, args: Vec<Type>) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + args.len());
        entries.extend_from_slice(&self.entries);
        entries.extend(args);
        Self {
            entries,
            base: self.entries.len(),
        }
    }

    /// Resolves the concrete type of `member` and the context its own
    /// members are visited with.
    ///
    /// A parameter without a binding falls back to the declared type.
    pub fn resolve(&self, member: &MemberInfo) -> Resolved {
        let ty = match member.declared() {
            Declared::Param(index) => match self.param(index) {
                Some(bound) => {
                    debug_assert_eq!(bound, member.ty(), "binding of `{}`", member.name());
                    bound
                }
                None => {
                    log::debug!(
                        "no binding for type parameter {index} of member `{}`, using `{}`",
                        member.name(),
                        member.ty(),
                    );
                    member.ty()
                }
            },
            Declared::Concrete => member.ty(),
        };
        Resolved {
            ty,
            bindings: self.extend(ty.args()),
        }
    }
}

impl Resolved {
    /// The concrete type, generic arguments included.
    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// The unparameterized form of the concrete type.
    #[inline]
    pub fn raw_path(&self) -> &'static str {
        self.ty.raw_path()
    }

    /// The context for the members of the concrete type.
    #[inline]
    pub fn bindings(&self) -> &TypeBindings {
        &self.bindings
    }

    #[inline]
    pub fn into_bindings(self) -> TypeBindings {
        self.bindings
    }
}

// -----------------------------------------------------------------------------
// Tests
