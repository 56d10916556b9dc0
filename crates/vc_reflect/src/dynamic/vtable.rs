use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use log::trace;
use vc_ptr::{ErasedBox, Ptr};

use crate::dynamic::{CloneWith, ImplementedBy, PrototypeInfo, Qualifier, Signature};
use crate::impls::GenericTypeCell;

// -----------------------------------------------------------------------------
// Slots

/// One overload of a slot: an erased function pointer and its [`Signature`].
#[derive(Clone)]
pub struct SlotFn {
    signature: Signature,
    func: Arc<dyn Any + Send + Sync>,
}

impl SlotFn {
    /// Stores `func` as an `F`, usually a function pointer type.
    #[inline]
    pub fn new<F: Any + Send + Sync + Copy>(qualifier: Qualifier, func: F) -> Self {
        Self {
            signature: Signature::of::<F>(qualifier),
            func: Arc::new(func),
        }
    }

    #[inline(always)]
    pub const fn signature(&self) -> Signature {
        self.signature
    }

    /// Returns the stored function if it is an `F`.
    #[inline]
    pub fn get<F: Any + Copy>(&self) -> Option<F> {
        self.func.downcast_ref::<F>().copied()
    }
}

impl fmt::Debug for SlotFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.signature, f)
    }
}

/// A named entry of a vtable.
#[derive(Clone, Debug)]
pub struct Slot {
    name: &'static str,
    overloads: Box<[SlotFn]>,
}

impl Slot {
    pub fn new(name: &'static str, overloads: impl IntoIterator<Item = SlotFn>) -> Self {
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
    pub fn overloads(&self) -> &[SlotFn] {
        &self.overloads
    }

    /// Returns the overload with exactly this signature.
    pub fn find(&self, signature: Signature) -> Option<&SlotFn> {
        self.overloads.iter().find(|func| func.signature == signature)
    }

    /// Returns the first overload stored as an `F`.
    pub fn get<F: Any + Copy>(&self) -> Option<F> {
        self.overloads.iter().find_map(SlotFn::get::<F>)
    }
}

// -----------------------------------------------------------------------------
// VTable

/// The function table of one concrete type behind one prototype.
///
/// Static tables come from [`VTable::of`], exist once per
/// `(prototype, concrete type, capability)` and are never freed.
/// Shim tables are synthesized by a [`ShimRegistry`](crate::dynamic::ShimRegistry)
/// when a [`Dyn`](crate::dynamic::Dyn) changes prototype.
pub struct VTable {
    prototype: TypeId,
    prototype_info: &'static PrototypeInfo,
    type_id: TypeId,
    type_name: &'static str,
    slots: Box<[Slot]>,
    drop_fn: fn(ErasedBox),
    clone_fn: Option<fn(Ptr<'_>) -> ErasedBox>,
}

/// Returned when a table cannot be synthesized.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MissingSlot {
    pub slot: &'static str,
    pub signature: &'static str,
}

impl VTable {
    /// Returns the static table of `T` behind the prototype `P`.
    pub fn of<P, T, C>() -> &'static VTable
    where
        P: ?Sized + ImplementedBy<T>,
        T: Send + Sync + 'static,
        C: CloneWith<T>,
    {
        static CELL: GenericTypeCell<VTable> = GenericTypeCell::new();
        CELL.get_or_insert::<(PhantomData<P>, T, C)>(|| {
            let table = VTable {
                prototype: TypeId::of::<P>(),
                prototype_info: P::prototype_info(),
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                slots: P::slots().into_boxed_slice(),
                drop_fn: ErasedBox::drop_as::<T>,
                clone_fn: C::clone_fn(),
            };
            #[cfg(feature = "debug")]
            debug_assert!(
                table.prototype_info.is_satisfied_by(&table.slots),
                "slots of `{}` do not match prototype `{}`",
                table.type_name,
                table.prototype_info.path(),
            );
            trace!(
                "created vtable of `{}` for prototype `{}`",
                table.type_name,
                table.prototype_info.path(),
            );
            table
        })
    }

    /// Builds a table for `prototype` that reuses the functions of `source`.
    ///
    /// Slots are matched by name and exact signature. Lifecycle functions and
    /// the concrete type are copied from `source`.
    pub(crate) fn synthesize(
        prototype: TypeId,
        prototype_info: &'static PrototypeInfo,
        source: &VTable,
    ) -> Result<VTable, MissingSlot> {
        let slots = prototype_info
            .slots()
            .iter()
            .map(|info| {
                let source_slot = source.slot_named(info.name());
                let overloads = info
                    .overloads()
                    .iter()
                    .map(|&signature| {
                        source_slot
                            .and_then(|slot| slot.find(signature))
                            .cloned()
                            .ok_or(MissingSlot {
                                slot: info.name(),
                                signature: signature.type_name(),
                            })
                    })
                    .collect::<Result<Box<[_]>, MissingSlot>>()?;
                Ok::<_, MissingSlot>(Slot {
                    name: info.name(),
                    overloads,
                })
            })
            .collect::<Result<Box<[_]>, MissingSlot>>()?;

        Ok(VTable {
            prototype,
            prototype_info,
            type_id: source.type_id,
            type_name: source.type_name,
            slots,
            drop_fn: source.drop_fn,
            clone_fn: source.clone_fn,
        })
    }

    /// The [`TypeId`] of the prototype, `dyn Trait`.
    #[inline(always)]
    pub const fn prototype(&self) -> TypeId {
        self.prototype
    }

    #[inline(always)]
    pub const fn prototype_info(&self) -> &'static PrototypeInfo {
        self.prototype_info
    }

    /// The [`TypeId`] of the concrete type.
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the concrete type, for diagnostics only.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slot_named(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Returns `true` if the table can clone its object.
    #[inline]
    pub const fn is_cloneable(&self) -> bool {
        self.clone_fn.is_some()
    }

    #[inline]
    pub(crate) fn drop_fn(&self) -> fn(ErasedBox) {
        self.drop_fn
    }

    #[inline]
    pub(crate) fn clone_fn(&self) -> Option<fn(Ptr<'_>) -> ErasedBox> {
        self.clone_fn
    }

    /// Returns the function of slot `index` stored as an `F`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such slot or overload.
    #[track_caller]
    pub(crate) fn slot_fn<F: Any + Copy>(&self, index: usize) -> F {
        match self.slots.get(index).and_then(Slot::get::<F>) {
            Some(func) => func,
            None => panic!(
                "vtable of `{}` for `{}` has no slot {index} of type `{}`",
                self.type_name,
                self.prototype_info.path(),
                type_name::<F>(),
            ),
        }
    }
}

impl fmt::Debug for VTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VTable")
            .field("prototype", &self.prototype_info.path())
            .field("type", &self.type_name)
            .field("slots", &self.slots)
            .field("cloneable", &self.is_cloneable())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Slot, SlotFn};
    use crate::dynamic::Qualifier;
    use vc_ptr::{Ptr, PtrMut};

    type Read = for<'a> fn(Ptr<'a>) -> u32;
    type Write = for<'a> fn(PtrMut<'a>, u32);

    fn read(this: Ptr<'_>) -> u32 {
        *this.get::<u32>()
    }

    fn write(this: PtrMut<'_>, value: u32) {
        *this.get::<u32>() = value;
    }

    #[test]
    fn slot_lookup_by_type() {
        let slot = Slot::new(
            "value",
            [
                SlotFn::new::<Read>(Qualifier::Ref, read),
                SlotFn::new::<Write>(Qualifier::Mut, write),
            ],
        );

        let mut x = 3_u32;
        let set = slot.get::<Write>().unwrap();
        set(PtrMut::from_mut(&mut x), 9);
        let get = slot.get::<Read>().unwrap();
        assert_eq!(get(Ptr::from_ref(&x)), 9);

        assert!(slot.get::<fn()>().is_none());
        let signature = slot.overloads()[1].signature();
        assert_eq!(signature.qualifier(), Qualifier::Mut);
        assert!(slot.find(signature).is_some());
    }
}
