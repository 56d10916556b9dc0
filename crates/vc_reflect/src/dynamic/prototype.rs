use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::dynamic::Slot;

// -----------------------------------------------------------------------------
// Qualifier

/// How a prototype method receives `self`.
///
/// - `Ref`: `&self`, covers const lvalues and const rvalues.
/// - `Mut`: `&mut self`, a mutable lvalue.
/// - `Owned`: `self`, the object is moved out of the [`Dyn`](crate::dynamic::Dyn).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Ref,
    Mut,
    Owned,
}

// -----------------------------------------------------------------------------
// Signature

/// The identity of a slot overload: its receiver and its erased function pointer type.
///
/// The function pointer type takes the erased receiver first, e.g.
/// `for<'a> fn(Ptr<'a>, i32) -> String` for `fn(&self, i32) -> String`.
#[derive(Clone, Copy)]
pub struct Signature {
    qualifier: Qualifier,
    type_id: TypeId,
    type_name: &'static str,
}

impl Signature {
    /// The signature of an overload stored as an `F`.
    #[inline]
    pub fn of<F: Any>(qualifier: Qualifier) -> Self {
        Self {
            qualifier,
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
        }
    }

    #[inline(always)]
    pub const fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    /// The [`TypeId`] of the function pointer type.
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the function pointer type, for diagnostics only.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Signature {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.qualifier == other.qualifier && self.type_id == other.type_id
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.qualifier, self.type_name)
    }
}

// -----------------------------------------------------------------------------
// Info

/// A named method of a prototype with its overload signatures.
#[derive(Clone, Debug)]
pub struct SlotInfo {
    name: &'static str,
    overloads: Box<[Signature]>,
}

impl SlotInfo {
    pub fn new(name: &'static str, overloads: impl IntoIterator<Item = Signature>) -> Self {
        Self {
            name,
            overloads: overloads.into_iter().collect(),
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn overloads(&self) -> &[Signature] {
        &self.overloads
    }
}

/// The interface described by a prototype: its slots in declaration order.
///
/// Slot indices used by [`Dyn::method_ref`](crate::dynamic::Dyn::method_ref)
/// and friends refer to this order.
#[derive(Clone, Debug)]
pub struct PrototypeInfo {
    name: &'static str,
    path: &'static str,
    slots: Box<[SlotInfo]>,
}

impl PrototypeInfo {
    pub fn new(
        name: &'static str,
        path: &'static str,
        slots: impl IntoIterator<Item = SlotInfo>,
    ) -> Self {
        Self {
            name,
            path,
            slots: slots.into_iter().collect(),
        }
    }

    /// The trait name, e.g. `Animal`.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The full trait path, e.g. `zoo::Animal`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    /// Returns the index and info of the slot called `name`.
    pub fn slot(&self, name: &str) -> Option<(usize, &SlotInfo)> {
        self.slots.iter().enumerate().find(|(_, slot)| slot.name == name)
    }

    /// Returns `true` if `slots` provide exactly the described slots, in order.
    pub fn is_satisfied_by(&self, slots: &[Slot]) -> bool {
        self.slots.len() == slots.len()
            && self.slots.iter().zip(slots).all(|(info, slot)| {
                info.name == slot.name()
                    && info.overloads.len() == slot.overloads().len()
                    && info
                        .overloads
                        .iter()
                        .zip(slot.overloads())
                        .all(|(sig, func)| *sig == func.signature())
            })
    }
}

// -----------------------------------------------------------------------------
// Traits

/// A trait object type usable as the interface of a [`Dyn`](crate::dynamic::Dyn).
///
/// Implemented for `dyn Trait` by the [`prototype`](crate::derive::prototype) attribute.
pub trait Prototype: 'static {
    fn prototype_info() -> &'static PrototypeInfo;
}

/// Builds the slots of a prototype for the concrete type `T`.
///
/// Slots are returned in the order of [`PrototypeInfo::slots`].
pub trait ImplementedBy<T: Send + Sync + 'static>: Prototype {
    fn slots() -> Vec<Slot>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{PrototypeInfo, Qualifier, Signature, SlotInfo};
    use crate::dynamic::{Slot, SlotFn};
    use vc_ptr::Ptr;

    type Speak = for<'a> fn(Ptr<'a>) -> u32;

    fn speak(_: Ptr<'_>) -> u32 {
        7
    }

    #[test]
    fn signature_identity() {
        let a = Signature::of::<Speak>(Qualifier::Ref);
        assert_eq!(a, Signature::of::<Speak>(Qualifier::Ref));
        assert_ne!(a, Signature::of::<Speak>(Qualifier::Mut));
        assert_ne!(a, Signature::of::<fn(Ptr<'static>) -> u32>(Qualifier::Ref));
    }

    #[test]
    fn satisfied_by_matching_slots() {
        let info = PrototypeInfo::new(
            "Speaker",
            "demo::Speaker",
            [SlotInfo::new("speak", [Signature::of::<Speak>(Qualifier::Ref)])],
        );
        let good = [Slot::new("speak", [SlotFn::new::<Speak>(Qualifier::Ref, speak)])];
        let renamed = [Slot::new("talk", [SlotFn::new::<Speak>(Qualifier::Ref, speak)])];

        assert!(info.is_satisfied_by(&good));
        assert!(!info.is_satisfied_by(&renamed));
        assert!(!info.is_satisfied_by(&[]));
        assert_eq!(info.slot("speak").map(|(index, _)| index), Some(0));
    }
}
