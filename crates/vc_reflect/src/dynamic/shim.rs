use alloc::sync::{Arc, Weak};
use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use log::{debug, trace, warn};
use vc_utils::hash::HashMap;

use crate::dynamic::vtable::MissingSlot;
use crate::dynamic::{Capability, Prototype, VTable};

type ShimMap = HashMap<ShimKey, Weak<ShimTable>>;

// -----------------------------------------------------------------------------
// ShimKey

/// Identifies a shim table: target prototype and capability, source
/// prototype, concrete type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShimKey {
    target: TypeId,
    source: TypeId,
    concrete: TypeId,
}

impl ShimKey {
    /// The key of the table converting `source` to `Dyn<Q, C>`.
    #[inline]
    pub fn new<Q: ?Sized + Prototype, C: Capability>(source: &VTable) -> Self {
        Self {
            target: TypeId::of::<(PhantomData<Q>, C)>(),
            source: source.prototype(),
            concrete: source.type_id(),
        }
    }
}

// -----------------------------------------------------------------------------
// ShimTable

/// A synthesized [`VTable`] shared by every converted [`Dyn`](crate::dynamic::Dyn)
/// of the same key.
///
/// The table removes itself from its registry when the last [`Arc`] goes away.
pub struct ShimTable {
    key: ShimKey,
    table: VTable,
    registry: Weak<Mutex<ShimMap>>,
}

impl ShimTable {
    #[inline(always)]
    pub const fn key(&self) -> &ShimKey {
        &self.key
    }

    #[inline(always)]
    pub const fn vtable(&self) -> &VTable {
        &self.table
    }
}

impl Drop for ShimTable {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut entries = registry.lock().unwrap_or_else(PoisonError::into_inner);
        // A newer live table may have replaced this one under the same key.
        if entries.get(&self.key).is_some_and(|weak| weak.strong_count() == 0) {
            entries.remove(&self.key);
            debug!(
                "evicted shim table of `{}` for `{}`",
                self.table.type_name(),
                self.table.prototype_info().path(),
            );
        }
    }
}

impl fmt::Debug for ShimTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShimTable")
            .field("key", &self.key)
            .field("table", &self.table)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ShimRegistry

/// A cache of shim tables, holding them weakly.
///
/// Converting two [`Dyn`](crate::dynamic::Dyn)s of the same concrete type to the
/// same prototype shares one table; the entry disappears once the last
/// converted instance is dropped.
///
/// Conversions use [`ShimRegistry::global`] unless given a registry explicitly.
/// Cloning a registry shares its entries.
///
/// # Examples
///
/// ```
/// # use vc_reflect::dynamic::ShimRegistry;
/// let registry = ShimRegistry::new();
/// assert!(registry.is_empty());
/// assert!(registry.clone().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct ShimRegistry {
    entries: Arc<Mutex<ShimMap>>,
}

impl ShimRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static ShimRegistry {
        static GLOBAL: OnceLock<ShimRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ShimRegistry::new)
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, ShimMap> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of cached tables.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no table is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns `true` if a live table converting `source` to `Dyn<Q, C>` is cached.
    pub fn contains<Q: ?Sized + Prototype, C: Capability>(&self, source: &VTable) -> bool {
        self.lock()
            .get(&ShimKey::new::<Q, C>(source))
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Returns the cached table for converting `source` to `Dyn<Q, C>`,
    /// synthesizing it on a miss.
    pub(crate) fn get_or_synthesize<Q: ?Sized + Prototype, C: Capability>(
        &self,
        source: &VTable,
    ) -> Result<Arc<ShimTable>, MissingSlot> {
        let key = ShimKey::new::<Q, C>(source);
        let info = Q::prototype_info();

        // No `Arc<ShimTable>` may be dropped while the lock is held,
        // its destructor locks the same map.
        let mut entries = self.lock();
        if let Some(weak) = entries.get(&key) {
            if let Some(table) = weak.upgrade() {
                trace!(
                    "reusing shim table of `{}` for `{}`",
                    source.type_name(),
                    info.path(),
                );
                return Ok(table);
            }
            warn!(
                "replacing expired shim table of `{}` for `{}`",
                source.type_name(),
                info.path(),
            );
        }

        let table = Arc::new(ShimTable {
            key,
            table: VTable::synthesize(TypeId::of::<Q>(), info, source)?,
            registry: Arc::downgrade(&self.entries),
        });
        entries.insert(key, Arc::downgrade(&table));
        debug!(
            "synthesized shim table of `{}` from `{}` to `{}`",
            source.type_name(),
            source.prototype_info().path(),
            info.path(),
        );
        Ok(table)
    }
}

impl fmt::Debug for ShimRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShimRegistry")
            .field("len", &self.len())
            .finish()
    }
}
