use core::any::type_name;
use core::fmt;

use crate::info::{Member, MemberInfo};
use crate::node::Node;
use crate::{DeserializeError, Visitor};

/// Fills the payload member of `O` from a whole document.
pub type PayloadFn<O> = fn(&mut O, &Visitor<'_>, &dyn Node) -> Result<(), DeserializeError>;

/// The ordered member table of a destination type `O`.
///
/// Members keep their declaration order. The filtered set is the members
/// carrying a [`Directive`](crate::info::Directive).
///
/// A descriptor may also name a payload member. A document mapped into
/// such a type fills the payload member instead of the type itself.
pub struct Descriptor<O> {
    type_path: &'static str,
    members: Box<[Member<O>]>,
    payload: Option<(&'static str, PayloadFn<O>)>,
}

impl<O: 'static> Descriptor<O> {
    pub fn new(members: impl IntoIterator<Item = Member<O>>) -> Self {
        Self {
            type_path: type_name::<O>(),
            members: members.into_iter().collect(),
            payload: None,
        }
    }

    /// Sets the payload member.
    #[inline]
    pub fn with_payload(mut self, member: &'static str, fill: PayloadFn<O>) -> Self {
        self.payload = Some((member, fill));
        self
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Iterates the members in declaration order, only those with a
    /// directive if `filtered` is `true`.
    pub fn members(&self, filtered: bool) -> impl Iterator<Item = &Member<O>> {
        self.members
            .iter()
            .filter(move |m| !filtered || m.info().directive().is_some())
    }

    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members
            .iter()
            .map(Member::info)
            .find(|info| info.name() == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// The payload member name and its fill function.
    #[inline]
    pub fn payload(&self) -> Option<(&'static str, PayloadFn<O>)> {
        self.payload
    }
}

impl<O> fmt::Debug for Descriptor<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type_path", &self.type_path)
            .field(
                "members",
                &self.members.iter().map(Member::info).collect::<Vec<_>>(),
            )
            .field("payload", &self.payload.map(|(name, _)| name))
            .finish()
    }
}
