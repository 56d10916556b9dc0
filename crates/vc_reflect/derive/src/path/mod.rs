//! Paths of the `vc_reflect` items used by generated code.
//!
//! Keeping them here means a module move in `vc_reflect` only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns how the caller reaches `vc_reflect`.
///
/// 1. Crates depending on `vc_reflect` get `::vc_reflect`.
/// 2. Crates depending on the facade `vc_meta` get `::vc_meta::reflect`.
/// 3. Otherwise `::vc_reflect`, which may be wrong.
///
/// This reads the caller's `Cargo.toml`, so call it once per macro invocation
/// and pass the result around.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_reflect"))
}

macro_rules! item_paths {
    ($($fn_name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $fn_name(vc_reflect_path: &syn::Path) -> TokenStream {
                quote! { #vc_reflect_path $(:: $segment)+ }
            }
        )*
    };
}

item_paths! {
    macro_utils_ => __macro_exports::macro_utils;

    // info
    type_path_ => info::TypePath;
    reflected_ => info::Reflected;
    reflect_methods_ => info::ReflectMethods;
    type_info_ => info::TypeInfo;
    member_info_ => info::MemberInfo;
    variable_info_ => info::VariableInfo;
    function_info_ => info::FunctionInfo;
    nested_type_info_ => info::NestedTypeInfo;
    attributes_ => info::Attributes;
    category_ => info::Category;
    generics_ => info::Generics;
    type_param_info_ => info::TypeParamInfo;
    const_param_info_ => info::ConstParamInfo;

    // cells
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    non_generic_type_cell_ => impls::NonGenericTypeCell;

    // invoke
    overload_ => invoke::Overload;

    // dynamic
    dyn_ => dynamic::Dyn;
    capability_ => dynamic::Capability;
    prototype_ => dynamic::Prototype;
    prototype_info_ => dynamic::PrototypeInfo;
    implemented_by_ => dynamic::ImplementedBy;
    qualifier_ => dynamic::Qualifier;
    signature_ => dynamic::Signature;
    slot_ => dynamic::Slot;
    slot_fn_ => dynamic::SlotFn;
    slot_info_ => dynamic::SlotInfo;
}
