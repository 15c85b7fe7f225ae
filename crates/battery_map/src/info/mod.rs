//! Static descriptions of destination types.
//!
//! - [`Shape`]: the closed classification of a member type.
//! - [`Type`]: a type identity with its generic arguments.
//! - [`TypeBindings`]: generic bindings passed from a parent object to its members.
//! - [`MemberInfo`], [`Member`], [`Descriptor`]: the member table of a destination type.
//! - [`NonGenericDescriptorCell`], [`GenericDescriptorCell`]: process-wide descriptor storage.
//!
//! Descriptors are generated by `#[derive(Response)]`.

// -----------------------------------------------------------------------------
// Modules

mod bindings;
mod cell;
mod descriptor;
mod member;
mod shape;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use bindings::{Resolved, TypeBindings};
pub use cell::{GenericDescriptorCell, NonGenericDescriptorCell};
pub use descriptor::{Descriptor, PayloadFn};
pub use member::{AssignFn, Declared, Directive, Member, MemberInfo};
pub use shape::Shape;
pub use ty::Type;
