use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{FnArg, ItemTrait, ReturnType, TraitItem, TraitItemFn, Type, parse_quote};

use crate::path::fp::{SendFP, SyncFP};
use crate::utils::{ElidedLifetimes, mentions_self};

/// How a prototype method takes `self`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SelfForm {
    Ref,
    Mut,
    Owned,
}

/// A trait method turned into a vtable slot.
struct SlotMethod {
    ident: Ident,
    form: SelfForm,
    params: Vec<Type>,
    output: ReturnType,
}

impl SlotMethod {
    fn parse(method: &TraitItemFn) -> syn::Result<Self> {
        let sig = &method.sig;
        if let Some(asyncness) = &sig.asyncness {
            return Err(syn::Error::new(asyncness.span(), "prototype methods cannot be async"));
        }
        if let Some(unsafety) = &sig.unsafety {
            return Err(syn::Error::new(unsafety.span(), "prototype methods cannot be unsafe"));
        }
        if let Some(constness) = &sig.constness {
            return Err(syn::Error::new(constness.span(), "prototype methods cannot be const"));
        }
        if let Some(variadic) = &sig.variadic {
            return Err(syn::Error::new(variadic.span(), "prototype methods cannot be variadic"));
        }
        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                sig.generics.span(),
                "prototype methods cannot have generic parameters",
            ));
        }

        let form = match sig.inputs.first() {
            Some(FnArg::Receiver(receiver)) => {
                if receiver.colon_token.is_some() {
                    return Err(syn::Error::new(
                        receiver.span(),
                        "typed receivers are not supported, use `self`, `&self` or `&mut self`",
                    ));
                }
                match &receiver.reference {
                    None => SelfForm::Owned,
                    Some(_) if receiver.mutability.is_some() => SelfForm::Mut,
                    Some(_) => SelfForm::Ref,
                }
            }
            _ => {
                return Err(syn::Error::new(
                    sig.ident.span(),
                    "prototype methods need a `self` receiver",
                ));
            }
        };

        let mut params = Vec::new();
        for input in sig.inputs.iter().skip(1) {
            if let FnArg::Typed(pat_type) = input {
                if mentions_self(&pat_type.ty) {
                    return Err(syn::Error::new(
                        pat_type.ty.span(),
                        "prototype parameters cannot mention `Self`",
                    ));
                }
                params.push((*pat_type.ty).clone());
            }
        }
        if let ReturnType::Type(_, ty) = &sig.output
            && mentions_self(ty)
        {
            return Err(syn::Error::new(
                ty.span(),
                "prototype return types cannot mention `Self`",
            ));
        }

        Ok(Self {
            ident: sig.ident.clone(),
            form,
            params,
            output: sig.output.clone(),
        })
    }

    fn arg_idents(&self) -> Vec<Ident> {
        (0..self.params.len())
            .map(|index| format_ident!("__arg{}", index))
            .collect()
    }

    /// The return type with elided lifetimes bound to the receiver.
    fn bound_output(&self) -> ReturnType {
        match (&self.output, self.form) {
            (ReturnType::Type(arrow, ty), SelfForm::Ref | SelfForm::Mut) => {
                let ty = ElidedLifetimes::new("'__a").apply(ty);
                ReturnType::Type(*arrow, Box::new(ty))
            }
            (output, _) => output.clone(),
        }
    }

    fn qualifier(&self, qualifier_: &TokenStream) -> TokenStream {
        match self.form {
            SelfForm::Ref => quote!(#qualifier_::Ref),
            SelfForm::Mut => quote!(#qualifier_::Mut),
            SelfForm::Owned => quote!(#qualifier_::Owned),
        }
    }

    /// The function pointer type stored in the slot.
    ///
    /// ```ignore
    /// for<'__a> fn(Ptr<'__a>, u32) -> &'__a str   // &self
    /// for<'__a> fn(PtrMut<'__a>, u32)             // &mut self
    /// fn(ErasedBox, u32) -> String                // self
    /// ```
    fn fn_type(&self, macro_utils_: &TokenStream) -> TokenStream {
        let params = &self.params;
        let output = self.bound_output();
        match self.form {
            SelfForm::Ref => quote! {
                for<'__a> fn(#macro_utils_::Ptr<'__a> #(, #params)*) #output
            },
            SelfForm::Mut => quote! {
                for<'__a> fn(#macro_utils_::PtrMut<'__a> #(, #params)*) #output
            },
            SelfForm::Owned => quote! {
                fn(#macro_utils_::ErasedBox #(, #params)*) #output
            },
        }
    }
}

/// Expands `#[prototype]` on a trait definition.
///
/// By-value methods get a `where Self: Sized` bound so that `dyn Trait`
/// stays a valid type. The generated implementations live in an anonymous
/// constant.
pub(crate) fn impl_prototype(args: TokenStream, mut item: ItemTrait) -> TokenStream {
    let vc_reflect_path = crate::path::vc_reflect();
    let mut errors = Vec::new();

    if !args.is_empty() {
        errors.push(syn::Error::new_spanned(&args, "`prototype` takes no arguments"));
    }
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        errors.push(syn::Error::new(
            item.generics.span(),
            "prototype traits cannot be generic",
        ));
    }
    if !item.supertraits.is_empty() {
        errors.push(syn::Error::new(
            item.supertraits.span(),
            "prototype traits cannot have supertraits",
        ));
    }
    if let Some(unsafety) = &item.unsafety {
        errors.push(syn::Error::new(unsafety.span(), "prototype traits cannot be unsafe"));
    }

    let mut methods = Vec::new();
    for trait_item in &mut item.items {
        let TraitItem::Fn(method) = trait_item else {
            errors.push(syn::Error::new(
                trait_item.span(),
                "prototype traits can only contain methods",
            ));
            continue;
        };
        match SlotMethod::parse(method) {
            Ok(slot) => {
                if slot.form == SelfForm::Owned {
                    method
                        .sig
                        .generics
                        .make_where_clause()
                        .predicates
                        .push(parse_quote!(Self: Sized));
                }
                methods.push(slot);
            }
            Err(err) => errors.push(err),
        }
    }

    if let Some(err) = crate::utils::combine_errors(errors) {
        let err = err.into_compile_error();
        return quote! {
            #item
            #err
        };
    }

    let macro_utils_ = crate::path::macro_utils_(&vc_reflect_path);
    let prototype_ = crate::path::prototype_(&vc_reflect_path);
    let prototype_info_ = crate::path::prototype_info_(&vc_reflect_path);
    let implemented_by_ = crate::path::implemented_by_(&vc_reflect_path);
    let non_generic_type_cell_ = crate::path::non_generic_type_cell_(&vc_reflect_path);
    let slot_info_ = crate::path::slot_info_(&vc_reflect_path);
    let signature_ = crate::path::signature_(&vc_reflect_path);
    let slot_ = crate::path::slot_(&vc_reflect_path);
    let slot_fn_ = crate::path::slot_fn_(&vc_reflect_path);
    let qualifier_ = crate::path::qualifier_(&vc_reflect_path);
    let dyn_ = crate::path::dyn_(&vc_reflect_path);
    let capability_ = crate::path::capability_(&vc_reflect_path);

    let trait_ident = &item.ident;
    let trait_name = trait_ident.to_string();
    let trait_path = format!("::{trait_name}");
    let concrete = quote!(__T: #trait_ident + #SendFP + #SyncFP + 'static);

    // Prototype
    let slot_infos = methods.iter().map(|method| {
        let name = method.ident.to_string();
        let fn_type = method.fn_type(&macro_utils_);
        let qualifier = method.qualifier(&qualifier_);
        quote! {
            #slot_info_::new(#name, [#signature_::of::<#fn_type>(#qualifier)])
        }
    });

    let prototype_impl = quote! {
        impl #prototype_ for dyn #trait_ident {
            fn prototype_info() -> &'static #prototype_info_ {
                static CELL: #non_generic_type_cell_<#prototype_info_> = #non_generic_type_cell_::new();
                CELL.get_or_init(|| {
                    #prototype_info_::new(
                        #trait_name,
                        ::core::concat!(::core::module_path!(), #trait_path),
                        [#(#slot_infos),*],
                    )
                })
            }
        }
    };

    // ImplementedBy
    let slot_fns = methods.iter().map(|method| {
        let ident = &method.ident;
        let fn_ident = format_ident!("__slot_{}", ident);
        let args = method.arg_idents();
        let params = &method.params;
        let output = method.bound_output();
        let (lifetime, this_ty, this_expr) = match method.form {
            SelfForm::Ref => (
                Some(quote!('__a,)),
                quote!(#macro_utils_::Ptr<'__a>),
                quote!(__this.get::<__T>()),
            ),
            SelfForm::Mut => (
                Some(quote!('__a,)),
                quote!(#macro_utils_::PtrMut<'__a>),
                quote!(__this.get::<__T>()),
            ),
            SelfForm::Owned => (
                None,
                quote!(#macro_utils_::ErasedBox),
                quote!(__this.into_inner::<__T>()),
            ),
        };
        quote! {
            fn #fn_ident<#lifetime #concrete>(__this: #this_ty #(, #args: #params)*) #output {
                <__T as #trait_ident>::#ident(#this_expr #(, #args)*)
            }
        }
    });

    let slots = methods.iter().map(|method| {
        let name = method.ident.to_string();
        let fn_ident = format_ident!("__slot_{}", method.ident);
        let fn_type = method.fn_type(&macro_utils_);
        let qualifier = method.qualifier(&qualifier_);
        quote! {
            #slot_::new(#name, [#slot_fn_::new::<#fn_type>(#qualifier, #fn_ident::<__T>)])
        }
    });

    let implemented_by_impl = quote! {
        impl<#concrete> #implemented_by_<__T> for dyn #trait_ident {
            fn slots() -> #macro_utils_::Vec<#slot_> {
                #(#slot_fns)*

                #macro_utils_::vec![#(#slots),*]
            }
        }
    };

    // Trait for Dyn
    let forwards = methods.iter().enumerate().map(|(index, method)| {
        let ident = &method.ident;
        let args = method.arg_idents();
        let params = &method.params;
        let output = &method.output;
        let fn_type = method.fn_type(&macro_utils_);
        let (receiver, accessor) = match method.form {
            SelfForm::Ref => (quote!(&self), quote!(method_ref)),
            SelfForm::Mut => (quote!(&mut self), quote!(method_mut)),
            SelfForm::Owned => (quote!(self), quote!(method_owned)),
        };
        quote! {
            #[inline]
            fn #ident(#receiver #(, #args: #params)*) #output {
                let (__this, __f) =
                    #dyn_::<dyn #trait_ident, __C>::#accessor::<#fn_type>(self, #index);
                __f(__this #(, #args)*)
            }
        }
    });

    let dyn_impl = quote! {
        impl<__C: #capability_> #trait_ident for #dyn_<dyn #trait_ident, __C> {
            #(#forwards)*
        }
    };

    quote! {
        #item

        const _: () = {
            #prototype_impl
            #implemented_by_impl
            #dyn_impl
        };
    }
}
