//! Items referenced by code that the derive macros and `submit_navigator!` emit.

#[cfg(feature = "auto_register")]
pub use inventory;
