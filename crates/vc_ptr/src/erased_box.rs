use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::ptr::NonNull;

use crate::{Ptr, PtrMut};

// -----------------------------------------------------------------------------
// ErasedBox

/// An owning pointer to a heap-allocated value of an erased type.
///
/// The allocation comes from [`Box`], the type is remembered only as a
/// [`TypeId`]. `ErasedBox` itself never runs the value's destructor;
/// call [`drop_as`](Self::drop_as) or [`into_box`](Self::into_box) with the
/// original type. Dropping an `ErasedBox` directly leaks the value.
///
/// Only `Send + Sync` values can be erased, so `ErasedBox` is `Send + Sync`.
///
/// # Examples
///
/// ```
/// # use vc_ptr::ErasedBox;
/// let erased = ErasedBox::new(String::from("meow"));
///
/// assert!(erased.is::<String>());
/// assert_eq!(erased.downcast_ref::<String>().unwrap(), "meow");
///
/// let boxed: Box<String> = erased.into_box().ok().unwrap();
/// assert_eq!(*boxed, "meow");
/// ```
pub struct ErasedBox {
    ptr: NonNull<u8>,
    type_id: TypeId,
    type_name: &'static str,
}

// SAFETY: every constructor requires `T: Send + Sync`.
unsafe impl Send for ErasedBox {}

// SAFETY: every constructor requires `T: Send + Sync`.
unsafe impl Sync for ErasedBox {}

impl ErasedBox {
    /// Moves `value` to the heap and erases its type.
    #[inline]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// Takes ownership of an existing allocation and erases its type.
    #[inline]
    pub fn from_box<T: Send + Sync + 'static>(boxed: Box<T>) -> Self {
        Self {
            ptr: NonNull::from(Box::leak(boxed)).cast(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the owned value.
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name of the owned value, for diagnostics only.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the owned value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the value as an erased [`Ptr`].
    #[inline]
    pub fn as_ptr(&self) -> Ptr<'_> {
        // SAFETY: `self.ptr` owns a live value of `self.type_id`,
        // the shared borrow of `self` prevents mutation.
        unsafe { Ptr::from_raw(self.ptr, self.type_id, self.type_name) }
    }

    /// Borrows the value as an erased [`PtrMut`].
    #[inline]
    pub fn as_ptr_mut(&mut self) -> PtrMut<'_> {
        // SAFETY: `self.ptr` owns a live value of `self.type_id`,
        // the exclusive borrow of `self` prevents aliasing.
        unsafe { PtrMut::from_raw(self.ptr, self.type_id, self.type_name) }
    }

    /// Returns `&T` if the owned value is a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_ptr().try_get::<T>()
    }

    /// Returns `&mut T` if the owned value is a `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_ptr_mut().try_get::<T>()
    }

    /// Restores the typed [`Box`], or gives `self` back if the type differs.
    #[inline]
    pub fn into_box<T: Any>(self) -> Result<Box<T>, Self> {
        if self.is::<T>() {
            // SAFETY: the allocation came from `Box<T>` with the same `TypeId`.
            Ok(unsafe { Box::from_raw(self.ptr.cast::<T>().as_ptr()) })
        } else {
            Err(self)
        }
    }

    /// Moves the owned value out as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if the owned value is not a `T`; the value is leaked in that case.
    #[track_caller]
    pub fn into_inner<T: Any>(self) -> T {
        match self.into_box::<T>() {
            Ok(boxed) => *boxed,
            Err(this) => panic!(
                "ErasedBox owns `{}`, cannot move it out as `{}`",
                this.type_name,
                type_name::<T>(),
            ),
        }
    }

    /// Drops the owned value as a `T` and frees the allocation.
    ///
    /// This is usually stored as a `fn(ErasedBox)` while `T` is still known.
    ///
    /// # Panics
    ///
    /// Panics if the owned value is not a `T`; the value is leaked in that case.
    #[track_caller]
    pub fn drop_as<T: Any>(self) {
        if let Err(this) = self.into_box::<T>() {
            panic!(
                "ErasedBox owns `{}`, cannot drop it as `{}`",
                this.type_name,
                type_name::<T>(),
            );
        }
    }

    /// Clones the owned value as a `T` into a new allocation.
    ///
    /// This is usually stored as a `fn(Ptr<'_>) -> ErasedBox` while `T` is still known.
    ///
    /// # Panics
    ///
    /// Panics if the pointee is not a `T`.
    #[track_caller]
    pub fn clone_as<T: Clone + Send + Sync + 'static>(ptr: Ptr<'_>) -> Self {
        Self::new(ptr.get::<T>().clone())
    }
}

impl fmt::Debug for ErasedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErasedBox<{}>({:?})", self.type_name, self.ptr)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ErasedBox;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn drop_runs_once() {
        let counter = Arc::new(());
        let erased = ErasedBox::new(counter.clone());
        assert_eq!(Arc::strong_count(&counter), 2);
        erased.drop_as::<Arc<()>>();
        assert_eq!(Arc::strong_count(&counter), 1);
    }

    #[test]
    fn wrong_type_is_returned() {
        let erased = ErasedBox::new(vec![1_u8, 2, 3]);
        let erased = erased.into_box::<String>().unwrap_err();
        assert_eq!(*erased.into_box::<Vec<u8>>().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn clone_into_new_allocation() {
        let mut erased = ErasedBox::new(String::from("a"));
        let copy = ErasedBox::clone_as::<String>(erased.as_ptr());
        erased.downcast_mut::<String>().unwrap().push('b');
        assert_eq!(copy.downcast_ref::<String>().unwrap(), "a");
        assert_eq!(erased.downcast_ref::<String>().unwrap(), "ab");
        copy.drop_as::<String>();
        erased.drop_as::<String>();
    }

    #[test]
    fn zero_sized_values() {
        #[derive(Clone, PartialEq, Debug)]
        struct Unit;
        let erased = ErasedBox::new(Unit);
        assert_eq!(erased.downcast_ref::<Unit>(), Some(&Unit));
        erased.drop_as::<Unit>();
    }
}
