#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

//! Compile-time reflection metadata and type-erased objects.
//!
//! - [`info`]: descriptors for types and their members.
//! - [`seq`]: immutable ordered sequences and compile-time type lists.
//! - [`query`]: filtering and lookup over member sequences.
//! - [`invoke`]: runtime invocation of members through erased arguments.
//! - [`dynamic`]: [`Dyn`](dynamic::Dyn), an owning handle to any type
//!   implementing a prototype trait, with cross-prototype conversion.
//!
//! # Example
//!
//! ```
//! use vc_reflect::derive::{Reflected, reflect_methods};
//! use vc_reflect::info::{Category, Reflected};
//! use vc_reflect::invoke::{Receiver, args};
//! use vc_reflect::query::MemberQuery;
//!
//! #[derive(Reflected, Default)]
//! #[reflect(methods)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! #[reflect_methods]
//! impl Counter {
//!     fn add(&mut self, n: i32) {
//!         self.value += n;
//!     }
//! }
//!
//! let info = Counter::type_info();
//! let functions = info.members().filter_by_category(Category::FUNCTION);
//! assert_eq!(functions.len(), 1);
//!
//! let mut counter = Counter::default();
//! info.invoke("add", Receiver::Mut(&mut counter), None, args![5]).unwrap();
//! assert_eq!(counter.value, 5);
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vc_reflect` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vc_reflect` can be used as an alias for `crate`.
extern crate self as vc_reflect;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

pub mod dynamic;
pub mod impls;
pub mod info;
pub mod invoke;
pub mod query;
pub mod seq;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use vc_reflect_derive as derive;

/// The most used items, for glob import.
pub mod prelude {
    pub use crate::derive::{Reflected, TypePath, prototype, reflect_methods};
    pub use crate::dynamic::{Cloneable, Dyn, Prototype, Unique};
    pub use crate::info::{Attribute, Category, MemberInfo, Reflected, TypeInfo, TypePath};
    pub use crate::invoke::{ArgList, Output, Receiver, args};
    pub use crate::query::MemberQuery;
    pub use crate::seq::{Seq, TypeList};
}
