#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Crates

extern crate alloc;

// The derive macros emit `::battery_map::...` paths, which must also
// resolve when they are used inside this crate.
extern crate self as battery_map;

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod context;
mod error;
mod resolve;
mod visitor;

pub mod adapter;
pub mod coerce;
pub mod info;
pub mod naming;
pub mod node;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use battery_map_derive as derive;

pub use builder::{ObjectBuilder, build};
pub use context::Context;
pub use error::{CoercionError, DeserializeError, ParseError, UnsupportedShape};
pub use resolve::{Lookup, lookup_member, lookup_path};
pub use value::{Enumeration, Response, Value};
pub use visitor::{Key, Visitor};
