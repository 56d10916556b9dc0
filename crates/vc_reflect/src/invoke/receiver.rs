use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::invoke::InvokeError;

// -----------------------------------------------------------------------------
// ReceiverKind

/// How a function or method takes its receiver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ReceiverKind {
    /// No receiver: a free function, associated function or constructor.
    Static,
    /// `&self`
    Ref,
    /// `&mut self`
    Mut,
    /// `self`
    Owned,
}

impl ReceiverKind {
    /// Ranks how well a receiver of kind `self` fits a callee expecting `want`.
    ///
    /// `0` is an exact match, larger is worse, `None` means incompatible.
    /// A mutable or owned receiver can lend a shared borrow, an owned receiver
    /// can lend a mutable one, and a static callee ignores any receiver.
    #[inline]
    pub const fn rank(self, want: ReceiverKind) -> Option<u8> {
        use ReceiverKind::*;
        match (self, want) {
            (Static, Static) | (Ref, Ref) | (Mut, Mut) | (Owned, Owned) => Some(0),
            (Mut, Ref) | (Owned, Mut) => Some(1),
            (Owned, Ref) => Some(2),
            (_, Static) => Some(3),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Receiver

/// The receiver passed to a runtime call.
///
/// The variants mirror [`ReceiverKind`]. Variables and methods need one of the
/// borrowing variants, static functions and constructors take [`Receiver::Static`].
pub enum Receiver<'a> {
    Static,
    Ref(&'a dyn Any),
    Mut(&'a mut dyn Any),
    Owned(Box<dyn Any>),
}

impl<'a> Receiver<'a> {
    /// Moves `value` into an owned receiver.
    #[inline]
    pub fn owned<T: Any>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }

    /// Returns the kind of this receiver.
    #[inline]
    pub const fn kind(&self) -> ReceiverKind {
        match self {
            Self::Static => ReceiverKind::Static,
            Self::Ref(_) => ReceiverKind::Ref,
            Self::Mut(_) => ReceiverKind::Mut,
            Self::Owned(_) => ReceiverKind::Owned,
        }
    }

    /// Returns the dynamic type of the receiver, `None` for [`Receiver::Static`].
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Self::Static => None,
            Self::Ref(this) => Some(Any::type_id(*this)),
            Self::Mut(this) => Some(Any::type_id(&**this)),
            Self::Owned(this) => Some(Any::type_id(&**this)),
        }
    }

    /// Lends the receiver as `&S` for the duration of `f`.
    pub(crate) fn with_ref<S: Any, R>(self, f: impl FnOnce(&S) -> R) -> Result<R, InvokeError> {
        let this: &dyn Any = match &self {
            Self::Ref(this) => *this,
            Self::Mut(this) => &**this,
            Self::Owned(this) => &**this,
            Self::Static => return Err(mismatch(ReceiverKind::Ref, ReceiverKind::Static)),
        };
        let this = this
            .downcast_ref::<S>()
            .ok_or(InvokeError::ReceiverType(type_name::<S>()))?;
        Ok(f(this))
    }

    /// Lends the receiver as `&mut S` for the duration of `f`.
    pub(crate) fn with_mut<S: Any, R>(
        mut self,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<R, InvokeError> {
        let actual = self.kind();
        let this: &mut dyn Any = match &mut self {
            Self::Mut(this) => &mut **this,
            Self::Owned(this) => &mut **this,
            Self::Static | Self::Ref(_) => return Err(mismatch(ReceiverKind::Mut, actual)),
        };
        let this = this
            .downcast_mut::<S>()
            .ok_or(InvokeError::ReceiverType(type_name::<S>()))?;
        Ok(f(this))
    }

    /// Moves the receiver out as an `S`.
    pub(crate) fn into_owned<S: Any>(self) -> Result<S, InvokeError> {
        match self {
            Self::Owned(this) => this
                .downcast::<S>()
                .map(|this| *this)
                .map_err(|_| InvokeError::ReceiverType(type_name::<S>())),
            other => Err(mismatch(ReceiverKind::Owned, other.kind())),
        }
    }
}

#[inline]
fn mismatch(expect: ReceiverKind, actual: ReceiverKind) -> InvokeError {
    InvokeError::ReceiverMismatch { expect, actual }
}

impl<'a, T: Any> From<&'a T> for Receiver<'a> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self::Ref(value)
    }
}

impl<'a, T: Any> From<&'a mut T> for Receiver<'a> {
    #[inline]
    fn from(value: &'a mut T) -> Self {
        Self::Mut(value)
    }
}

impl fmt::Debug for Receiver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receiver::{:?}", self.kind())
    }
}

// -----------------------------------------------------------------------------
// Output

/// The result of a runtime call.
///
/// Functions and constructors produce values, variables produce borrows into
/// the receiver (or into static storage).
pub enum Output<'a> {
    Value(Box<dyn Any>),
    Ref(&'a dyn Any),
    Mut(&'a mut dyn Any),
}

impl<'a> Output<'a> {
    /// Returns the dynamic type of the produced value.
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Value(value) => Any::type_id(&**value),
            Self::Ref(value) => Any::type_id(*value),
            Self::Mut(value) => Any::type_id(&**value),
        }
    }

    /// Returns `true` if this holds an owned value.
    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrows the produced value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Value(value) => value.downcast_ref(),
            Self::Ref(value) => value.downcast_ref(),
            Self::Mut(value) => value.downcast_ref(),
        }
    }

    /// Mutably borrows the produced value as a `T`. `None` for [`Output::Ref`].
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(value) => value.downcast_mut(),
            Self::Ref(_) => None,
            Self::Mut(value) => value.downcast_mut(),
        }
    }

    /// Takes the owned value as a `T`, or gives `self` back.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Value(value) => value.downcast::<T>().map(|v| *v).map_err(Self::Value),
            other => Err(other),
        }
    }

    /// Returns the mutable borrow, if this is one.
    #[inline]
    pub fn into_mut(self) -> Option<&'a mut dyn Any> {
        match self {
            Self::Mut(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Value(_) => "Value",
            Self::Ref(_) => "Ref",
            Self::Mut(_) => "Mut",
        };
        write!(f, "Output::{kind}({:?})", self.type_id())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Receiver, ReceiverKind};
    use crate::invoke::InvokeError;

    #[test]
    fn rank_prefers_exact() {
        use ReceiverKind::*;
        assert_eq!(Mut.rank(Mut), Some(0));
        assert_eq!(Mut.rank(Ref), Some(1));
        assert_eq!(Ref.rank(Mut), None);
        assert_eq!(Ref.rank(Owned), None);
        assert_eq!(Owned.rank(Ref), Some(2));
        assert_eq!(Owned.rank(Static), Some(3));
        assert_eq!(Static.rank(Ref), None);
    }

    #[test]
    fn owned_receiver_lends_mutably() {
        let receiver = Receiver::owned(41_i32);
        let out = receiver.with_mut(|x: &mut i32| {
            *x += 1;
            *x
        });
        assert_eq!(out, Ok(42));

        let mut value = 1_u8;
        let err = Receiver::Mut(&mut value).into_owned::<u8>().unwrap_err();
        assert_eq!(
            err,
            InvokeError::ReceiverMismatch {
                expect: ReceiverKind::Owned,
                actual: ReceiverKind::Mut,
            }
        );
        assert_eq!(
            Receiver::Ref(&value).with_ref(|x: &u16| *x),
            Err(InvokeError::ReceiverType("u16"))
        );
    }
}
