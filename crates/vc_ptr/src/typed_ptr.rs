use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_ptr {
    ($ptr:ident) => {
        impl $ptr<'_> {
            /// Returns the [`TypeId`] of the pointee.
            #[inline(always)]
            pub const fn type_id(&self) -> TypeId {
                self.type_id
            }

            /// Returns the type name of the pointee, for diagnostics only.
            #[inline(always)]
            pub const fn type_name(&self) -> &'static str {
                self.type_name
            }

            /// Returns `true` if the pointee is a `T`.
            #[inline]
            pub fn is<T: Any>(&self) -> bool {
                self.type_id == TypeId::of::<T>()
            }

            #[cold]
            #[inline(never)]
            #[track_caller]
            fn mismatch<T: Any>(&self) -> ! {
                panic!(
                    "{} points to `{}`, not `{}`",
                    stringify!($ptr),
                    self.type_name,
                    type_name::<T>(),
                )
            }
        }

        impl fmt::Pointer for $ptr<'_> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.ptr, f)
            }
        }

        impl fmt::Debug for $ptr<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>({:?})", stringify!($ptr), self.type_name, self.ptr)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Ptr

/// An erased shared reference, similar to `&'a dyn Any`.
///
/// Unlike `&dyn Any` it carries no vtable, only the pointee's [`TypeId`],
/// so it is the natural "self" handle for functions stored in a vtable.
///
/// # Examples
///
/// ```
/// # use vc_ptr::Ptr;
/// let x = 8i32;
/// let ptr = Ptr::from_ref(&x);
///
/// assert!(ptr.is::<i32>());
/// assert_eq!(*ptr.get::<i32>(), 8);
/// assert!(ptr.try_get::<u32>().is_none());
/// ```
#[derive(Copy, Clone)]
pub struct Ptr<'a> {
    ptr: NonNull<u8>,
    type_id: TypeId,
    type_name: &'static str,
    _marker: PhantomData<&'a u8>,
}

impl_ptr!(Ptr);

impl<'a> Ptr<'a> {
    /// Creates a `Ptr` from a reference with the same lifetime.
    #[inline]
    pub fn from_ref<T: Any>(val: &'a T) -> Self {
        Self {
            ptr: NonNull::from_ref(val).cast(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            _marker: PhantomData,
        }
    }

    /// Creates a `Ptr` from raw parts.
    ///
    /// # Safety
    ///
    /// - `ptr` must point to a live value whose type has `type_id`.
    /// - The value must stay valid and not be mutated for `'a`.
    #[inline]
    pub(crate) unsafe fn from_raw(
        ptr: NonNull<u8>,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Self {
        Self {
            ptr,
            type_id,
            type_name,
            _marker: PhantomData,
        }
    }

    /// Returns the pointee as `&T`, or `None` if it is another type.
    #[inline]
    pub fn try_get<T: Any>(self) -> Option<&'a T> {
        if self.is::<T>() {
            // SAFETY: the pointer was created from a `&'a T` with the same `TypeId`.
            Some(unsafe { self.ptr.cast::<T>().as_ref() })
        } else {
            None
        }
    }

    /// Returns the pointee as `&T`.
    ///
    /// # Panics
    ///
    /// Panics if the pointee is not a `T`.
    #[inline]
    #[track_caller]
    pub fn get<T: Any>(self) -> &'a T {
        match self.try_get::<T>() {
            Some(val) => val,
            None => self.mismatch::<T>(),
        }
    }
}

impl<'a, T: Any> From<&'a T> for Ptr<'a> {
    #[inline]
    fn from(val: &'a T) -> Self {
        Self::from_ref(val)
    }
}

// -----------------------------------------------------------------------------
// PtrMut

/// An erased exclusive reference, similar to `&'a mut dyn Any`.
///
/// It cannot be copied; use [`reborrow`](PtrMut::reborrow) to pass it on
/// without giving it up.
///
/// # Examples
///
/// ```
/// # use vc_ptr::PtrMut;
/// let mut x = 8i32;
/// let mut ptr = PtrMut::from_mut(&mut x);
///
/// *ptr.reborrow().get::<i32>() += 2;
/// assert_eq!(*ptr.as_ref().get::<i32>(), 10);
/// ```
pub struct PtrMut<'a> {
    ptr: NonNull<u8>,
    type_id: TypeId,
    type_name: &'static str,
    _marker: PhantomData<&'a mut u8>,
}

impl_ptr!(PtrMut);

impl<'a> PtrMut<'a> {
    /// Creates a `PtrMut` from a mutable reference with the same lifetime.
    #[inline]
    pub fn from_mut<T: Any>(val: &'a mut T) -> Self {
        Self {
            ptr: NonNull::from_mut(val).cast(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            _marker: PhantomData,
        }
    }

    /// Creates a `PtrMut` from raw parts.
    ///
    /// # Safety
    ///
    /// - `ptr` must point to a live, exclusively borrowed value whose type has `type_id`.
    /// - The value must stay valid and unaliased for `'a`.
    #[inline]
    pub(crate) unsafe fn from_raw(
        ptr: NonNull<u8>,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Self {
        Self {
            ptr,
            type_id,
            type_name,
            _marker: PhantomData,
        }
    }

    /// Borrows this pointer for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> PtrMut<'_> {
        PtrMut {
            ptr: self.ptr,
            type_id: self.type_id,
            type_name: self.type_name,
            _marker: PhantomData,
        }
    }

    /// Returns a shared view of the pointee.
    #[inline]
    pub fn as_ref(&self) -> Ptr<'_> {
        Ptr {
            ptr: self.ptr,
            type_id: self.type_id,
            type_name: self.type_name,
            _marker: PhantomData,
        }
    }

    /// Consumes the pointer, returning `&mut T`, or `None` if it is another type.
    #[inline]
    pub fn try_get<T: Any>(self) -> Option<&'a mut T> {
        if self.is::<T>() {
            // SAFETY: the pointer was created from a `&'a mut T` with the same `TypeId`
            // and `self` is consumed, so the borrow stays exclusive.
            Some(unsafe { self.ptr.cast::<T>().as_mut() })
        } else {
            None
        }
    }

    /// Consumes the pointer, returning `&mut T`.
    ///
    /// # Panics
    ///
    /// Panics if the pointee is not a `T`.
    #[inline]
    #[track_caller]
    pub fn get<T: Any>(self) -> &'a mut T {
        if !self.is::<T>() {
            self.mismatch::<T>();
        }
        // SAFETY: checked above, see `try_get`.
        unsafe { self.ptr.cast::<T>().as_mut() }
    }
}

impl<'a, T: Any> From<&'a mut T> for PtrMut<'a> {
    #[inline]
    fn from(val: &'a mut T) -> Self {
        Self::from_mut(val)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Ptr, PtrMut};

    #[test]
    fn checked_access() {
        let x = 5_u64;
        let ptr = Ptr::from_ref(&x);
        assert!(ptr.is::<u64>());
        assert!(!ptr.is::<i64>());
        assert_eq!(ptr.try_get::<u64>(), Some(&5));
        assert_eq!(ptr.try_get::<i64>(), None);
        assert!(ptr.type_name().contains("u64"));
    }

    #[test]
    fn mutate_through_reborrow() {
        let mut s = alloc::string::String::from("ab");
        let mut ptr = PtrMut::from_mut(&mut s);
        ptr.reborrow().get::<alloc::string::String>().push('c');
        assert_eq!(ptr.as_ref().get::<alloc::string::String>(), "abc");
        assert!(ptr.try_get::<u8>().is_none());
        assert_eq!(s, "abc");
    }

    #[test]
    #[should_panic(expected = "not `i32`")]
    fn wrong_type_panics() {
        let x = 1_u8;
        Ptr::from_ref(&x).get::<i32>();
    }
}
