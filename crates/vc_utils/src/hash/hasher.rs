use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// Seeded foldhash

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// `foldhash` with a compile-time seed, so hashes repeat across runs.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("shim");
/// assert_eq!(a, FixedHashState.hash_one("shim"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl FixedHashState {
    const SEED: FixedState = FixedState::with_seed(0x7663_5f6d_6574_6121);
}

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> FixedHasher {
        Self::SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Identity hashing

/// Uses a written `u64` as the hash unchanged.
///
/// Meant for [`TypeId`](core::any::TypeId) keys, which hash as one `u64`.
/// Other writes are mixed in byte by byte.
#[derive(Copy, Clone, Default, Debug)]
pub struct IdHasher(u64);

impl Hasher for IdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.0 = value;
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |acc, &b| acc.rotate_left(8) ^ u64::from(b));
    }
}

/// Builds [`IdHasher`]s.
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::IdHashState;
///
/// assert_eq!(IdHashState.hash_one(3_u64), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct IdHashState;

impl BuildHasher for IdHashState {
    type Hasher = IdHasher;

    #[inline(always)]
    fn build_hasher(&self) -> IdHasher {
        IdHasher(0)
    }
}
