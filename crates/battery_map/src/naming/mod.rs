//! Translation between member names and document keys.
//!
//! A [`NamingPolicy`] maps a local member name to the key expected in the
//! document, and back. [`FieldNameTranslator`] builds a policy from two
//! [`FieldNameTransformer`]s: one for the local convention and one for the
//! remote convention.
//!
//! # Examples
//!
//! ```
//! use battery_map::naming::{CamelCase, FieldNameTranslator, NamingPolicy, SnakeCase};
//!
//! let naming = FieldNameTranslator::new(SnakeCase, CamelCase);
//!
//! assert_eq!(naming.local_to_remote("created_at"), "createdAt");
//! assert_eq!(naming.remote_to_local("createdAt"), "created_at");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod split;
mod transformer;

// -----------------------------------------------------------------------------
// Exports

pub use split::split_by_case;
pub use transformer::{CamelCase, FieldNameTransformer, SnakeCase};

// -----------------------------------------------------------------------------
// NamingPolicy

/// Maps member names to document keys and back.
pub trait NamingPolicy: Send + Sync {
    fn local_to_remote(&self, name: &str) -> String;

    fn remote_to_local(&self, name: &str) -> String;
}

/// The naming policy that keeps names unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl NamingPolicy for Identity {
    #[inline]
    fn local_to_remote(&self, name: &str) -> String {
        name.to_owned()
    }

    #[inline]
    fn remote_to_local(&self, name: &str) -> String {
        name.to_owned()
    }
}

// -----------------------------------------------------------------------------
// FieldNameTranslator

/// A naming policy between two naming conventions.
///
/// `local_to_remote` splits a name with the local transformer and joins the
/// parts with the remote one; `remote_to_local` does the opposite.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldNameTranslator<L, R> {
    local: L,
    remote: R,
}

impl<L: FieldNameTransformer, R: FieldNameTransformer> FieldNameTranslator<L, R> {
    #[inline]
    pub const fn new(local: L, remote: R) -> Self {
        Self { local, remote }
    }

    #[inline]
    pub fn local(&self) -> &L {
        &self.local
    }

    #[inline]
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

impl<L: FieldNameTransformer, R: FieldNameTransformer> NamingPolicy for FieldNameTranslator<L, R> {
    fn local_to_remote(&self, name: &str) -> String {
        self.remote.encode(&self.local.decode(name))
    }

    fn remote_to_local(&self, name: &str) -> String {
        self.local.encode(&self.remote.decode(name))
    }
}

// -----------------------------------------------------------------------------
// Tests
