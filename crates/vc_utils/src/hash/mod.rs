//! Hash containers with deterministic hash states, re-exports *hashbrown* and *foldhash*.
//!
//! - [`FixedHashState`]: `foldhash` with a fixed seed, for general keys.
//! - [`IdHashState`]: the identity on a single `u64`, for keys that are
//!   already hashes such as [`TypeId`](core::any::TypeId).

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{IdHashState, IdHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
