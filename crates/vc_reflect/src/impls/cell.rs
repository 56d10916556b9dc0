//! Lazily built, program-lifetime storage for per-type data.
//!
//! A plain type writes `static CELL: NonGenericTypeCell<_>` in its impl and
//! gets a [`OnceLock`]. A generic impl cannot do that: its `static` would be
//! shared by all instantiations. [`GenericTypeCell`] therefore keeps one
//! leaked value per [`TypeId`].
//!
//! Stored data is limited to [`TypeInfo`], type path [`String`]s,
//! [`PrototypeInfo`] and [`VTable`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::dynamic::{PrototypeInfo, VTable};
use crate::info::TypeInfo;

mod sealed {
    use super::{PrototypeInfo, TypeInfo, VTable};
    use alloc::string::String;

    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
    impl TypedProperty for PrototypeInfo {}
    impl TypedProperty for VTable {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// A `OnceLock` for data of one non-generic type.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Holds the [`TypeInfo`] of a non-generic type.
///
/// ## Example
///
/// ```
/// # use vc_reflect::impls::NonGenericTypeInfoCell;
/// # use vc_reflect::info::{Reflected, TypeInfo, TypePath};
/// struct Unit;
///
/// impl TypePath for Unit {
///     fn type_path() -> &'static str { "demo::Unit" }
///     fn type_name() -> &'static str { "Unit" }
///     fn type_ident() -> &'static str { "Unit" }
/// }
///
/// impl Reflected for Unit {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::builder::<Self>().build())
///     }
/// }
///
/// assert_eq!(Unit::type_info().type_path(), "demo::Unit");
/// assert!(core::ptr::eq(Unit::type_info(), Unit::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

impl<T: TypedProperty> Default for NonGenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// One lazily leaked value per instantiation of a generic type.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Holds the [`TypeInfo`] of every instantiation of a generic type.
///
/// ## Example
///
/// ```
/// # use vc_reflect::impls::GenericTypeInfoCell;
/// # use vc_reflect::info::{Generics, Reflected, TypeInfo, TypeParamInfo, TypePath};
/// # use vc_reflect::derive::TypePath;
/// #[derive(TypePath)]
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> Reflected for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeInfo::builder::<Self>()
///                 .with_generics(Generics::new().with(TypeParamInfo::new::<T>("T")))
///                 .build()
///         })
///     }
/// }
///
/// let info = <Wrapper<u64>>::type_info();
/// assert_eq!(info.type_name(), "Wrapper<u64>");
/// assert!(info.generics().get_named("T").unwrap().is::<u64>());
/// assert!(!core::ptr::eq(info, <Wrapper<u8>>::type_info()));
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Holds the built `type_path` or `type_name` of a generic type.
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value of `G`, building it with `make` the first time.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, make: impl FnOnce() -> T) -> &T {
        self.lookup(TypeId::of::<G>(), make)
    }

    // Not generic over `G`, one copy per `T` and closure.
    #[inline(never)]
    fn lookup(&self, type_id: TypeId, make: impl FnOnce() -> T) -> &'static T {
        let cached = self.0.read().unwrap_or_else(PoisonError::into_inner).get(&type_id).copied();
        if let Some(value) = cached {
            return value;
        }

        // No lock is held here, `make` may recurse into this cell.
        let value = make();
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *map.get_or_insert_with(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: TypedProperty> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
