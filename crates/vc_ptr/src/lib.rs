//! Type-checked erased pointers.
//!
//! These are the storage and self handles behind `vc_reflect::dynamic::Dyn`.
//! Every pointer remembers the [`TypeId`](core::any::TypeId) of its pointee,
//! so turning it back into a typed reference is a checked operation.
//!
//! **Ptr** and **PtrMut**
//!
//! [`Ptr<'a>`] and [`PtrMut<'a>`] are erased `&T` and `&mut T` equivalents.
//! They keep the borrow's lifetime, and [`get`](Ptr::get) panics when the
//! requested type differs from the pointee.
//!
//! **ErasedBox**
//!
//! [`ErasedBox`] owns a heap allocation of an unknown type. It has no `Drop`
//! implementation: the owner must consume it through [`drop_as`](ErasedBox::drop_as)
//! or [`into_box`](ErasedBox::into_box), usually via a function pointer recorded
//! when the concrete type was still known. If it is neither, the value leaks.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod erased_box;
mod typed_ptr;

// -----------------------------------------------------------------------------
// Top-level exports

pub use erased_box::ErasedBox;
pub use typed_ptr::{Ptr, PtrMut};
