//! Parsing of macro inputs into the data the code generators need.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_input;
mod reflect_meta;
mod type_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, MethodAttributes, TypeAttributes};
pub(crate) use reflect_input::ReflectInput;
pub(crate) use reflect_meta::ReflectMeta;
pub(crate) use type_parser::TypeParser;
