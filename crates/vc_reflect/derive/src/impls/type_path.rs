use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::OptionFP;

fn static_path_cell(vc_reflect_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(vc_reflect_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generates the `TypePath` implementation.
///
/// Generic types build their strings once per instantiation in a
/// `GenericTypePathCell`, other types use `concat!` literals.
pub(crate) fn impl_type_path(meta: &ReflectMeta) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let type_path_ = crate::path::type_path_(vc_reflect_path);
    let real_ident = meta.real_ident();

    let names = meta.names();
    let path = names.type_path(vc_reflect_path);
    let name = names.type_name(vc_reflect_path);

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(vc_reflect_path, path.into_owned(vc_reflect_path)),
            static_path_cell(vc_reflect_path, name.into_owned(vc_reflect_path)),
            crate::utils::empty(),
        )
    } else {
        (path.into_borrowed(), name.into_borrowed(), quote! { #[inline] })
    };

    let type_ident = names.type_ident().into_borrowed();
    let module_path = names.module_path().into_borrowed();

    let (impl_generics, ty_generics, where_clause) = meta.split_generics([]);

    quote! {
        impl #impl_generics #type_path_ for #real_ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #OptionFP::Some(#module_path)
            }
        }
    }
}
