use crate::info::{Shape, Type, TypeBindings};
use crate::{DeserializeError, Lookup, Value, Visitor};

// -----------------------------------------------------------------------------
// Directive

/// The per-member mapping annotation, `#[response(..)]`.
///
/// Members with a directive form the filtered member set read from the
/// top level of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directive {
    required: bool,
    name: Option<&'static str>,
}

impl Directive {
    #[inline]
    pub const fn new() -> Self {
        Self {
            required: false,
            name: None,
        }
    }

    /// Marks the member as required.
    #[inline]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the explicit document key, which may be a dotted path.
    #[inline]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    #[inline]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// The explicit document key, `None` when the naming policy decides.
    ///
    /// An empty name counts as no name.
    #[inline]
    pub const fn name(&self) -> Option<&'static str> {
        match self.name {
            Some(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Declared

/// How a member's type was written in the destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    /// Exactly the type parameter at this index of the owner.
    Param(usize),
    Concrete,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Static information about one member of a destination type.
#[derive(Debug, Clone, Copy)]
pub struct MemberInfo {
    name: &'static str,
    ty: Type,
    declared: Declared,
    shape: Shape,
    element: Option<Shape>,
    nullable: bool,
    directive: Option<Directive>,
    setter: bool,
}

impl MemberInfo {
    /// Creates the info of a member named `name` with type `T`.
    pub fn new<T: Value>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            declared: Declared::Concrete,
            shape: T::SHAPE,
            element: T::element(),
            nullable: T::NULLABLE,
            directive: None,
            setter: false,
        }
    }

    /// Records that the member type is the owner's type parameter `index`.
    #[inline]
    pub const fn with_param(mut self, index: usize) -> Self {
        self.declared = Declared::Param(index);
        self
    }

    #[inline]
    pub const fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Marks the member as assigned through a setter.
    ///
    /// Setters are only called with values found in the document,
    /// absent and null values never reach them.
    #[inline]
    pub const fn with_setter(mut self) -> Self {
        self.setter = true;
        self
    }

    /// The member name as written in the destination type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type, with the owner's parameters already substituted.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub const fn declared(&self) -> Declared {
        self.declared
    }

    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// The shape of sequence or mapping elements.
    #[inline]
    pub const fn element_shape(&self) -> Option<Shape> {
        self.element
    }

    /// Returns `true` for `Option` members.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn directive(&self) -> Option<&Directive> {
        self.directive.as_ref()
    }

    #[inline]
    pub const fn is_required(&self) -> bool {
        match &self.directive {
            Some(d) => d.is_required(),
            None => false,
        }
    }

    #[inline]
    pub const fn explicit_name(&self) -> Option<&'static str> {
        match &self.directive {
            Some(d) => d.name(),
            None => None,
        }
    }

    #[inline]
    pub const fn is_setter(&self) -> bool {
        self.setter
    }
}

// -----------------------------------------------------------------------------
// Member

/// Reads one member from its lookup result and assigns it to the destination.
///
/// Generated per member by `#[derive(Response)]`, usually as a call to
/// [`Visitor::member_value`] followed by a field store or a setter call.
pub type AssignFn<O> = fn(
    &mut O,
    &Visitor<'_>,
    &MemberInfo,
    Lookup<'_>,
    &TypeBindings,
) -> Result<(), DeserializeError>;

/// A member of a destination type `O`.
pub struct Member<O> {
    info: MemberInfo,
    assign: AssignFn<O>,
}

impl<O> Member<O> {
    #[inline]
    pub const fn new(info: MemberInfo, assign: AssignFn<O>) -> Self {
        Self { info, assign }
    }

    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        &self.info
    }

    /// Assigns the member of `dest` from `lookup`.
    #[inline]
    pub fn assign(
        &self,
        dest: &mut O,
        visitor: &Visitor<'_>,
        lookup: Lookup<'_>,
        bindings: &TypeBindings,
    ) -> Result<(), DeserializeError> {
        (self.assign)(dest, visitor, &self.info, lookup, bindings)
    }
}
