//! Immutable ordered sequences and compile-time type lists.
//!
//! [`Seq`] is the value-level sequence returned by member queries,
//! [`TypeList`] is its type-level counterpart, implemented for tuples.

// -----------------------------------------------------------------------------
// Modules

mod apply;
mod seq;
mod type_list;

// -----------------------------------------------------------------------------
// Exports

pub use apply::{Apply, TupleValues, ValueVisitor};
pub use seq::Seq;
pub use type_list::{TypeList, TypeVisitor};
