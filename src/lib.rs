//! Reflection metadata, generic member invocation and type-erased `Dyn` wrappers.
//!
//! - [`ptr`]: type-checked erased pointers used as `Dyn` storage and self handles.
//! - [`utils`]: `TypeIdMap`, hash containers and the `tuple_invoke!` helper.
//! - [`reflect`]: the descriptor model, member queries, invocation and `Dyn`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_ptr as ptr;
pub use vc_reflect as reflect;
pub use vc_utils as utils;
