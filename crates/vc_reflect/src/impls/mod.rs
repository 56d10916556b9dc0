//! Reflection data for foreign types, and the static cells used to store it.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{
    GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeCell,
    NonGenericTypeInfoCell,
};

use alloc::string::String;

/// Concatenates string slices into an owned [`String`], sized up front.
///
/// Used to build the type paths of generic types.
///
/// ```
/// # use vc_reflect::impls::concat;
/// assert_eq!(concat(&["Vec", "<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|s| s.len()).sum());
    parts.iter().for_each(|s| out.push_str(s));
    out
}
