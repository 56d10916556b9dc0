//! Scenarios spanning the derive macros, queries, invocation and `Dyn`.

mod dyn_objects;
mod metadata;
