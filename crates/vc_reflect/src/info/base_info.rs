use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::info::variable_info::{ErasedField, TypedField};
use crate::info::{Reflected, TypeInfo};

// -----------------------------------------------------------------------------
// BaseInfo

/// A base of a reflected type.
///
/// The members of a base are inherited by the derived type. If the base is
/// embedded as a field, the projection to that field lets inherited variables
/// and methods be invoked on the derived type.
#[derive(Clone)]
pub struct BaseInfo {
    info: fn() -> &'static TypeInfo,
    upcast: Option<Arc<dyn ErasedField>>,
}

impl BaseInfo {
    /// A base `B` without projection.
    ///
    /// Inherited members are listed, but instance members cannot be invoked
    /// through the derived type.
    #[inline]
    pub fn of<B: Reflected>() -> Self {
        Self {
            info: B::type_info,
            upcast: None,
        }
    }

    /// A base `B` embedded in `S`.
    #[inline]
    pub fn embedded<S: Any, B: Reflected>(get: fn(&S) -> &B, get_mut: fn(&mut S) -> &mut B) -> Self {
        Self {
            info: B::type_info,
            upcast: Some(Arc::new(TypedField { get, get_mut })),
        }
    }

    /// The descriptor of the base.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// Returns `true` if the base can be reached from a derived value.
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.upcast.is_some()
    }

    /// Projects a derived value to this base.
    #[inline]
    pub fn upcast<'a>(&self, derived: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.as_ref()?.get(derived)
    }

    /// Projects a derived value to this base.
    #[inline]
    pub fn upcast_mut<'a>(&self, derived: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.as_ref()?.get_mut(derived)
    }
}

impl fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseInfo")
            .field("ty", &self.info().ty())
            .field("embedded", &self.is_embedded())
            .finish()
    }
}
