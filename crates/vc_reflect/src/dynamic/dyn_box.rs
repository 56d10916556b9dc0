use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;

use vc_ptr::{ErasedBox, Ptr, PtrMut};

use crate::dynamic::{
    Capability, CloneWith, Cloneable, ConvertError, ConvertFrom, ImplementedBy, Prototype,
    ShimRegistry, ShimTable, Unique, VTable,
};

// -----------------------------------------------------------------------------
// VTableRef

/// The table held by a non-empty [`Dyn`].
#[derive(Clone, Debug)]
pub enum VTableRef {
    /// A table built once per concrete type, never freed.
    Static(&'static VTable),
    /// A synthesized table, shared through a [`ShimRegistry`].
    Shared(Arc<ShimTable>),
}

impl VTableRef {
    #[inline]
    pub fn get(&self) -> &VTable {
        match self {
            Self::Static(table) => table,
            Self::Shared(shim) => shim.vtable(),
        }
    }
}

// -----------------------------------------------------------------------------
// Dyn

/// An owning handle to a value of any type implementing the prototype `P`.
///
/// `P` is a trait object type such as `dyn Animal`, made a prototype by the
/// [`prototype`](crate::derive::prototype) attribute, which also implements
/// the trait for `Dyn<dyn Animal, C>` by dispatching through the vtable.
///
/// A `Dyn` is either empty or owns an object together with its vtable.
/// Moving out with [`take`](Dyn::take) leaves the source empty.
/// Calling a method of an empty `Dyn` panics.
///
/// `C` selects the [`Capability`]: [`Unique`] values move, [`Cloneable`]
/// values also implement [`Clone`].
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::prototype;
/// use vc_reflect::dynamic::{Cloneable, Dyn};
///
/// #[prototype]
/// trait Shape {
///     fn area(&self) -> f64;
///     fn scale(&mut self, by: f64);
/// }
///
/// #[derive(Clone)]
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
///     fn scale(&mut self, by: f64) {
///         self.0 *= by;
///     }
/// }
///
/// let mut shape: Dyn<dyn Shape, Cloneable> = Dyn::new(Square(2.0));
/// let copy = shape.clone();
/// shape.scale(2.0);
///
/// assert_eq!(shape.area(), 16.0);
/// assert_eq!(copy.area(), 4.0);
/// assert_eq!(copy.downcast_ref::<Square>().map(|s| s.0), Some(2.0));
/// ```
pub struct Dyn<P: ?Sized + Prototype, C: Capability = Unique> {
    inner: Option<(ErasedBox, VTableRef)>,
    _marker: PhantomData<(fn() -> *const P, C)>,
}

impl<P: ?Sized + Prototype, C: Capability> Dyn<P, C> {
    /// Creates an empty `Dyn`.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            inner: None,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn from_parts(object: ErasedBox, table: VTableRef) -> Self {
        Self {
            inner: Some((object, table)),
            _marker: PhantomData,
        }
    }

    /// Moves `value` to the heap behind the static vtable of `T`.
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Send + Sync + 'static,
        P: ImplementedBy<T>,
        C: CloneWith<T>,
    {
        Self::from_box(Box::new(value))
    }

    /// Takes ownership of a boxed value.
    pub fn from_box<T>(value: Box<T>) -> Self
    where
        T: Send + Sync + 'static,
        P: ImplementedBy<T>,
        C: CloneWith<T>,
    {
        Self::from_parts(
            ErasedBox::from_box(value),
            VTableRef::Static(VTable::of::<P, T, C>()),
        )
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Moves the object out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
            _marker: PhantomData,
        }
    }

    /// The [`TypeId`] of the owned object.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.vtable().map(VTable::type_id)
    }

    /// The type name of the owned object, for diagnostics only.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.vtable().map(VTable::type_name)
    }

    #[inline]
    pub fn vtable(&self) -> Option<&VTable> {
        self.inner.as_ref().map(|(_, table)| table.get())
    }

    /// The synthesized table, if this value was converted from another prototype.
    #[inline]
    pub fn shim_table(&self) -> Option<&Arc<ShimTable>> {
        match &self.inner {
            Some((_, VTableRef::Shared(shim))) => Some(shim),
            _ => None,
        }
    }

    /// Returns `true` if the table was synthesized by a conversion.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shim_table().is_some()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref()?.0.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_mut()?.0.downcast_mut::<T>()
    }

    /// Moves the object out as a `T`, or returns `self` if it is empty or another type.
    pub fn into_inner<T: Any>(mut self) -> Result<T, Self> {
        match self.inner.take() {
            Some((object, table)) => match object.into_box::<T>() {
                Ok(boxed) => Ok(*boxed),
                Err(object) => Err(Self::from_parts(object, table)),
            },
            None => Err(self),
        }
    }

    #[cold]
    #[track_caller]
    fn empty_call(slot: usize) -> ! {
        panic!(
            "called slot {slot} of `{}` on an empty Dyn",
            P::prototype_info().path(),
        )
    }

    /// Returns the object as `&self` and the function of slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is empty or the slot is not an `F`.
    #[track_caller]
    pub fn method_ref<F: Any + Copy>(&self, slot: usize) -> (Ptr<'_>, F) {
        match &self.inner {
            Some((object, table)) => (object.as_ptr(), table.get().slot_fn::<F>(slot)),
            None => Self::empty_call(slot),
        }
    }

    /// Returns the object as `&mut self` and the function of slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is empty or the slot is not an `F`.
    #[track_caller]
    pub fn method_mut<F: Any + Copy>(&mut self, slot: usize) -> (PtrMut<'_>, F) {
        match &mut self.inner {
            Some((object, table)) => (object.as_ptr_mut(), table.get().slot_fn::<F>(slot)),
            None => Self::empty_call(slot),
        }
    }

    /// Moves the object out as `self` and returns it with the function of slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is empty or the slot is not an `F`.
    #[track_caller]
    pub fn method_owned<F: Any + Copy>(mut self, slot: usize) -> (ErasedBox, F) {
        match self.inner.take() {
            Some((object, table)) => (object, table.get().slot_fn::<F>(slot)),
            None => Self::empty_call(slot),
        }
    }

    /// Converts to another prototype through the global [`ShimRegistry`].
    #[inline]
    pub fn try_convert<Q, C2>(self) -> Result<Dyn<Q, C2>, ConvertError<P, C>>
    where
        Q: ?Sized + Prototype,
        C2: ConvertFrom<C>,
    {
        self.try_convert_in(ShimRegistry::global())
    }

    /// Converts to another prototype, sharing tables through `registry`.
    ///
    /// Every slot of `Q` must exist in the current table with the same name
    /// and signature. An empty `Dyn` converts to an empty `Dyn`.
    pub fn try_convert_in<Q, C2>(
        mut self,
        registry: &ShimRegistry,
    ) -> Result<Dyn<Q, C2>, ConvertError<P, C>>
    where
        Q: ?Sized + Prototype,
        C2: ConvertFrom<C>,
    {
        let Some((_, table)) = &self.inner else {
            return Ok(Dyn::empty());
        };
        match registry.get_or_synthesize::<Q, C2>(table.get()) {
            Ok(shim) => match self.inner.take() {
                Some((object, _)) => Ok(Dyn::from_parts(object, VTableRef::Shared(shim))),
                None => Ok(Dyn::empty()),
            },
            Err(missing) => Err(ConvertError::new(
                self,
                Q::prototype_info().path(),
                missing.slot,
                missing.signature,
            )),
        }
    }

    /// Converts to another prototype.
    ///
    /// # Panics
    ///
    /// Panics if a slot of `Q` is missing, see [`try_convert`](Dyn::try_convert).
    #[track_caller]
    pub fn convert<Q, C2>(self) -> Dyn<Q, C2>
    where
        Q: ?Sized + Prototype,
        C2: ConvertFrom<C>,
    {
        match self.try_convert() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Replaces `self` with `source` converted to `P`.
    ///
    /// On failure `self` is unchanged and `source` is returned in the error.
    pub fn assign_converted<Q, C2>(&mut self, source: Dyn<Q, C2>) -> Result<(), ConvertError<Q, C2>>
    where
        Q: ?Sized + Prototype,
        C2: Capability,
        C: ConvertFrom<C2>,
    {
        *self = source.try_convert::<P, C>()?;
        Ok(())
    }
}

impl<P: ?Sized + Prototype, C: Capability> Drop for Dyn<P, C> {
    fn drop(&mut self) {
        if let Some((object, table)) = self.inner.take() {
            (table.get().drop_fn())(object);
        }
    }
}

impl<P: ?Sized + Prototype, C: Capability> Default for Dyn<P, C> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: ?Sized + Prototype> Clone for Dyn<P, Cloneable> {
    /// Clones the object through the table; the table itself is shared.
    fn clone(&self) -> Self {
        let Some((object, table)) = &self.inner else {
            return Self::empty();
        };
        match table.get().clone_fn() {
            Some(clone_fn) => Self::from_parts(clone_fn(object.as_ptr()), table.clone()),
            None => panic!(
                "vtable of `{}` for `{}` has no clone function",
                object.type_name(),
                P::prototype_info().path(),
            ),
        }
    }
}

impl<P: ?Sized + Prototype, C: Capability> fmt::Debug for Dyn<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = P::prototype_info().name();
        match self.type_name() {
            Some(type_name) => write!(f, "Dyn<{name}>({type_name})"),
            None => write!(f, "Dyn<{name}>(empty)"),
        }
    }
}
