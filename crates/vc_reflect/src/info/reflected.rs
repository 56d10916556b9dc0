use alloc::vec::Vec;

use crate::info::{MemberInfo, TypeInfo, TypePath};
use crate::invoke::Overload;

// -----------------------------------------------------------------------------
// Reflected

/// A type with a static [`TypeInfo`].
///
/// Usually implemented with [`#[derive(Reflected)]`](crate::derive::Reflected),
/// see [`TypeInfoBuilder`](crate::info::TypeInfoBuilder) for a manual
/// implementation.
pub trait Reflected: TypePath {
    /// Returns the descriptor of this type.
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to [`Reflected`].
pub trait DynamicReflected {
    /// See [`Reflected::type_info`].
    fn reflected_info(&self) -> &'static TypeInfo;
}

impl<T: Reflected> DynamicReflected for T {
    #[inline]
    fn reflected_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}

/// Returns the descriptor of `T`.
#[inline(always)]
pub fn type_info_of<T: Reflected>() -> &'static TypeInfo {
    T::type_info()
}

// -----------------------------------------------------------------------------
// ReflectMethods

/// The function members and constructors of a type.
///
/// Implemented by [`#[reflect_methods]`](crate::derive::reflect_methods) on an
/// inherent `impl` block, and used by `#[derive(Reflected)]` when the type is
/// marked `#[reflect(methods)]`.
pub trait ReflectMethods {
    /// The function members, in declaration order.
    fn reflect_methods() -> Vec<MemberInfo>;

    /// The constructor overloads.
    fn reflect_constructors() -> Vec<Overload> {
        Vec::new()
    }
}
