//! Hash containers with deterministic hashing, re-exports *hashbrown* and *foldhash*.
//!
//! - [`FixedHashState`]: `foldhash` seeded with a constant, for string keys
//!   such as MIME types.
//! - [`TypeIdHashState`]: for [`TypeId`](core::any::TypeId) keys, which are
//!   hashes already.

use core::hash::{BuildHasher, BuildHasherDefault, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: u64 = 0x6C62_2F4D_5A1B_93E7;

/// Builds [`FoldHasher`]s from one compile-time seed, so a key hashes to
/// the same value in every process.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use battery_utils::hash::FixedHashState;
///
/// let state = FixedHashState::default();
/// assert_eq!(state.hash_one("user_name"), FixedHashState::default().hash_one("user_name"));
/// ```
#[derive(Clone, Debug)]
pub struct FixedHashState(FixedState);

impl Default for FixedHashState {
    #[inline]
    fn default() -> Self {
        Self(FixedState::with_seed(SEED))
    }
}

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        self.0.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// TypeIdHashState

/// Keeps the last `u64` written to it as the hash.
///
/// Inputs written as bytes are folded in, so keys hashed through other
/// `write_*` calls still spread.
#[derive(Copy, Clone, Default, Debug)]
pub struct TypeIdHasher(u64);

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |hash, byte| hash.rotate_left(8) ^ u64::from(*byte));
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.0 = value;
    }
}

/// Hash state for [`TypeId`](core::any::TypeId) keys.
///
/// ```
/// use core::hash::BuildHasher;
/// use battery_utils::hash::TypeIdHashState;
///
/// assert_eq!(TypeIdHashState::default().hash_one(42_u64), 42);
/// ```
pub type TypeIdHashState = BuildHasherDefault<TypeIdHasher>;

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// ```
/// use battery_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("application/json", 1);
/// assert_eq!(map.get("application/json"), Some(&1));
///
/// let cloned = map.clone();
/// assert_eq!(cloned.get("application/json"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::{FixedHashState, HashMap};

    #[test]
    fn fixed_state_survives_clone() {
        let state = FixedHashState::default();
        let cloned = state.clone();
        assert_eq!(state.hash_one("text/json"), cloned.hash_one("text/json"));

        let mut map: HashMap<&str, u8> = HashMap::with_hasher(cloned);
        map.insert("text/json", 2);
        assert_eq!(map.clone().get("text/json"), Some(&2));
    }
}
