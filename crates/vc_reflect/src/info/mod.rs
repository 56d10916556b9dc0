//! Descriptors for reflected types and their members.
//!
//! A [`TypeInfo`] describes one type: its [`Category`], generic arguments,
//! bases, [`Attributes`] and an ordered sequence of [`MemberInfo`].
//! Each member is either a nested type, a variable or an overloaded function.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod base_info;
mod builder;
mod category;
mod docs_macro;
mod function_info;
mod generics;
mod member_info;
mod nested_info;
mod reflected;
mod type_info;
mod type_path;
mod variable_info;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::{Attribute, Attributes, DynAttribute};
pub use base_info::BaseInfo;
pub use builder::TypeInfoBuilder;
pub use category::Category;
pub use function_info::{FunctionInfo, ResolveError};
pub use generics::{ConstParamInfo, ConstParamType, ConstValue, GenericInfo, Generics, TypeParamInfo};
pub use member_info::{MemberInfo, MemberKind};
pub use nested_info::NestedTypeInfo;
pub use reflected::{DynamicReflected, ReflectMethods, Reflected, type_info_of};
pub use type_info::TypeInfo;
pub use type_path::{Type, TypePath};
pub use variable_info::VariableInfo;

pub(crate) use type_path::impl_type_fn;
