//! Small containers and macros shared by the `vc_meta` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by the
//!   per-type static cells of `vc_reflect`.
//! - [`hash`]: `hashbrown` containers with fixed (deterministic) hash states.
//! - [`tuple_invoke!`]: expands a macro once per tuple arity.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod tuple_invoke;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
