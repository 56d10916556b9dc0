//! Type-erased owning handles dispatching through vtables.
//!
//! A prototype is a trait marked with [`prototype`](crate::derive::prototype).
//! [`Dyn<dyn Trait, C>`](Dyn) owns any value implementing it and implements
//! the trait itself by forwarding to the value's [`VTable`].
//!
//! ## Tables
//!
//! - Static tables are built once per prototype, concrete type and capability
//!   and live for the program.
//! - Shim tables map one prototype onto another for a concrete type. They are
//!   synthesized on the first conversion, shared through a [`ShimRegistry`]
//!   and freed with the last `Dyn` using them.
//!
//! ## Capabilities
//!
//! [`Unique`] handles move only. [`Cloneable`] handles implement [`Clone`]
//! and can only be converted from other `Cloneable` handles.

// -----------------------------------------------------------------------------
// Modules

mod capability;
mod dyn_box;
mod error;
mod prototype;
mod shim;
mod vtable;

// -----------------------------------------------------------------------------
// Exports

pub use capability::{Capability, CloneWith, Cloneable, ConvertFrom, Unique};
pub use dyn_box::{Dyn, VTableRef};
pub use error::ConvertError;
pub use prototype::{ImplementedBy, Prototype, PrototypeInfo, Qualifier, Signature, SlotInfo};
pub use shim::{ShimKey, ShimRegistry, ShimTable};
pub use vtable::{Slot, SlotFn, VTable};
