use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::derive_data::ReflectInput;

/// Generates the `Reflected` implementation.
///
/// Members are added in this order: nested types, fields, then the members
/// of the `#[reflect_methods]` block. Embedded bases come first, then the
/// `#[reflect(base = ..)]` bases.
pub(crate) fn impl_reflected(input: &ReflectInput) -> TokenStream {
    let meta = &input.meta;
    let vc_reflect_path = meta.vc_reflect_path();
    let attrs = meta.attrs();

    let reflected_ = crate::path::reflected_(vc_reflect_path);
    let reflect_methods_ = crate::path::reflect_methods_(vc_reflect_path);
    let type_info_ = crate::path::type_info_(vc_reflect_path);
    let member_info_ = crate::path::member_info_(vc_reflect_path);
    let variable_info_ = crate::path::variable_info_(vc_reflect_path);
    let nested_type_info_ = crate::path::nested_type_info_(vc_reflect_path);

    let real_ident = meta.real_ident();
    let mut predicates = Vec::new();

    let embedded_bases = input.embedded_bases().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        predicates.push(quote!(#ty: #reflected_));
        quote! {
            .embedded_base::<Self, #ty>(|this| &this.#member, |this| &mut this.#member)
        }
    });
    let embedded_bases: Vec<_> = embedded_bases.collect();

    let bases: Vec<_> = attrs
        .bases
        .iter()
        .map(|ty| {
            predicates.push(quote!(#ty: #reflected_));
            quote! { .base::<#ty>() }
        })
        .collect();

    let nested: Vec<_> = attrs
        .nested
        .iter()
        .map(|(name, ty)| {
            predicates.push(quote!(#ty: #reflected_));
            quote! { .nested(#name, #nested_type_info_::of::<#ty>()) }
        })
        .collect();

    let variable_target = Ident::new("VARIABLE", Span::call_site());
    let variables = input.variables().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        let name = field.name();
        let attributes = field
            .attrs
            .custom_attributes
            .expression(vc_reflect_path, &variable_target);
        let docs = field.attrs.docs_expression();
        quote! {
            .member(
                #member_info_::new::<Self>(
                    #name,
                    #variable_info_::field::<Self, #ty>(|this| &this.#member, |this| &mut this.#member),
                )
                #attributes
                #docs
            )
        }
    });

    let methods = if attrs.methods {
        quote! {
            .members(<Self as #reflect_methods_>::reflect_methods())
            .constructors(<Self as #reflect_methods_>::reflect_constructors())
        }
    } else {
        crate::utils::empty()
    };

    let type_target = Ident::new(
        if meta.impl_with_generic() {
            "TYPE_TEMPLATE"
        } else {
            "TYPE"
        },
        Span::call_site(),
    );
    let attributes = attrs
        .custom_attributes
        .expression(vc_reflect_path, &type_target);
    let generics = meta.with_generics_expression();
    let docs = attrs.docs_expression();

    let builder = quote! {
        #type_info_::builder::<Self>()
            #generics
            #attributes
            #docs
            #(#embedded_bases)*
            #(#bases)*
            #(#nested)*
            #(#variables)*
            #methods
            .build()
    };

    let cell = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #builder)
        }
    } else {
        let cell_ = crate::path::non_generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #builder)
        }
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(predicates);

    quote! {
        impl #impl_generics #reflected_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #cell
            }
        }
    }
}
