use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, format_ident, quote};
use syn::spanned::Spanned;
use syn::{FnArg, GenericParam, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Type};

use crate::REFLECT_ATTRIBUTE_NAME;
use crate::derive_data::MethodAttributes;
use crate::utils::TypeSubstitution;

// -----------------------------------------------------------------------------
// Parsed methods

#[derive(Clone, Copy, PartialEq, Eq)]
enum ReceiverForm {
    Static,
    Ref,
    Mut,
    Owned,
}

/// One overload to register, after instantiation.
struct MethodOverload {
    receiver: ReceiverForm,
    ident: Ident,
    params: Vec<Type>,
    type_args: Option<Vec<Type>>,
    span: Span,
}

impl MethodOverload {
    /// Tokens that identify the signature, used to find duplicates.
    fn signature_key(&self) -> String {
        let receiver = match self.receiver {
            ReceiverForm::Static => "static",
            ReceiverForm::Ref => "ref",
            ReceiverForm::Mut => "mut",
            ReceiverForm::Owned => "owned",
        };
        let params = self.params.iter().map(|ty| ty.to_token_stream().to_string());
        let type_args = self
            .type_args
            .iter()
            .flatten()
            .map(|ty| ty.to_token_stream().to_string());
        let mut key = String::from(receiver);
        for part in params {
            key.push('|');
            key.push_str(&part);
        }
        if self.type_args.is_some() {
            key.push_str("|<");
            for part in type_args {
                key.push_str(&part);
                key.push(',');
            }
        }
        key
    }

    fn to_overload(&self, overload_: &TokenStream) -> TokenStream {
        let ident = &self.ident;
        let args: Vec<Ident> = (0..self.params.len())
            .map(|index| format_ident!("__arg{}", index))
            .collect();
        let params = &self.params;

        let turbofish = match &self.type_args {
            Some(types) => quote!(::<#(#types),*>),
            None => crate::utils::empty(),
        };
        let with_type_args = match &self.type_args {
            Some(types) => quote!(.with_type_args::<(#(#types,)*)>()),
            None => crate::utils::empty(),
        };

        let (constructor, this_param, this_arg) = match self.receiver {
            ReceiverForm::Static => (quote!(function), None, None),
            ReceiverForm::Ref => (
                quote!(method),
                Some(quote!(__this: &Self,)),
                Some(quote!(__this,)),
            ),
            ReceiverForm::Mut => (
                quote!(method_mut),
                Some(quote!(__this: &mut Self,)),
                Some(quote!(__this,)),
            ),
            ReceiverForm::Owned => (
                quote!(method_owned),
                Some(quote!(__this: Self,)),
                Some(quote!(__this,)),
            ),
        };

        quote! {
            #overload_::#constructor(
                |#this_param #(#args: #params),*| Self::#ident #turbofish(#this_arg #(#args),*)
            )
            #with_type_args
        }
    }
}

/// The methods sharing one member name, in declaration order.
struct MethodGroup {
    name: LitStr,
    overloads: Vec<MethodOverload>,
    attributes: Vec<TokenStream>,
    docs: TokenStream,
}

// -----------------------------------------------------------------------------
// Checks

fn check_value_type(ty: &Type, what: &str) -> syn::Result<()> {
    match ty {
        Type::Reference(_) => Err(syn::Error::new(
            ty.span(),
            format!("reflected methods cannot {what} references, use an owned type"),
        )),
        Type::ImplTrait(_) => Err(syn::Error::new(
            ty.span(),
            format!("reflected methods cannot {what} `impl Trait`"),
        )),
        Type::Group(group) => check_value_type(&group.elem, what),
        Type::Paren(paren) => check_value_type(&paren.elem, what),
        _ => Ok(()),
    }
}

fn parse_receiver(method: &ImplItemFn) -> syn::Result<ReceiverForm> {
    let Some(FnArg::Receiver(receiver)) = method.sig.inputs.first() else {
        return Ok(ReceiverForm::Static);
    };
    if receiver.colon_token.is_some() {
        return Err(syn::Error::new(
            receiver.span(),
            "typed receivers are not supported, use `self`, `&self` or `&mut self`",
        ));
    }
    Ok(match &receiver.reference {
        None => ReceiverForm::Owned,
        Some(_) if receiver.mutability.is_some() => ReceiverForm::Mut,
        Some(_) => ReceiverForm::Ref,
    })
}

/// Checks a method and expands its instantiations.
fn parse_method(method: &ImplItemFn, attrs: &MethodAttributes) -> syn::Result<Vec<MethodOverload>> {
    let sig = &method.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new(asyncness.span(), "async methods cannot be reflected"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new(unsafety.span(), "unsafe methods cannot be reflected"));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new(variadic.span(), "variadic methods cannot be reflected"));
    }

    let receiver = parse_receiver(method)?;
    if attrs.constructor && receiver != ReceiverForm::Static {
        return Err(syn::Error::new(
            sig.ident.span(),
            "a constructor cannot take `self`",
        ));
    }

    let mut params = Vec::new();
    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            check_value_type(&pat_type.ty, "take")?;
            params.push((*pat_type.ty).clone());
        }
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        check_value_type(ty, "return")?;
    }

    let mut type_params = Vec::new();
    for param in &sig.generics.params {
        match param {
            GenericParam::Type(param) => type_params.push(param.ident.clone()),
            GenericParam::Lifetime(param) => {
                return Err(syn::Error::new(
                    param.span(),
                    "reflected methods cannot have lifetime parameters",
                ));
            }
            GenericParam::Const(param) => {
                return Err(syn::Error::new(
                    param.span(),
                    "reflected methods cannot have const parameters",
                ));
            }
        }
    }

    let span = sig.ident.span();
    if type_params.is_empty() {
        if !attrs.instantiations.is_empty() {
            return Err(syn::Error::new(
                span,
                "`instantiate` needs a method with type parameters",
            ));
        }
        return Ok(vec![MethodOverload {
            receiver,
            ident: sig.ident.clone(),
            params,
            type_args: None,
            span,
        }]);
    }

    if attrs.instantiations.is_empty() {
        return Err(syn::Error::new(
            span,
            "generic methods need at least one `#[reflect(instantiate(..))]`",
        ));
    }

    attrs
        .instantiations
        .iter()
        .map(|types| {
            if types.len() != type_params.len() {
                return Err(syn::Error::new(
                    span,
                    format!(
                        "expected {} type arguments in `instantiate`, found {}",
                        type_params.len(),
                        types.len(),
                    ),
                ));
            }
            let mut substitution =
                TypeSubstitution::new(type_params.iter().cloned().zip(types.iter().cloned()));
            Ok(MethodOverload {
                receiver,
                ident: sig.ident.clone(),
                params: params.iter().map(|ty| substitution.apply(ty)).collect(),
                type_args: Some(types.clone()),
                span,
            })
        })
        .collect()
}

fn check_duplicates(overloads: &[MethodOverload], name: &LitStr) -> Vec<syn::Error> {
    let mut errors = Vec::new();
    for (index, overload) in overloads.iter().enumerate() {
        let key = overload.signature_key();
        if overloads[..index].iter().any(|prev| prev.signature_key() == key) {
            errors.push(syn::Error::new(
                overload.span,
                format!("`{}` already has an overload with this signature", name.value()),
            ));
        }
    }
    errors
}

// -----------------------------------------------------------------------------
// Expansion

/// Expands `#[reflect_methods]` on an inherent `impl` block.
///
/// The block is emitted unchanged except for the removed `#[reflect(..)]`
/// attributes, followed by an implementation of `ReflectMethods`.
pub(crate) fn impl_reflect_methods(args: TokenStream, mut item: ItemImpl) -> TokenStream {
    let vc_reflect_path = crate::path::vc_reflect();
    let mut errors = Vec::new();

    if !args.is_empty() {
        errors.push(syn::Error::new_spanned(&args, "`reflect_methods` takes no arguments"));
    }
    if let Some((_, path, _)) = &item.trait_ {
        errors.push(syn::Error::new_spanned(
            path,
            "`reflect_methods` only works on inherent impl blocks",
        ));
    }

    let function_target = Ident::new("FUNCTION", Span::call_site());
    let mut groups: Vec<MethodGroup> = Vec::new();
    let mut constructors: Vec<MethodOverload> = Vec::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = match MethodAttributes::parse_attrs(&method.attrs) {
            Ok(attrs) => attrs,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };
        method
            .attrs
            .retain(|attr| !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME));
        if attrs.skip {
            continue;
        }

        let overloads = match parse_method(method, &attrs) {
            Ok(overloads) => overloads,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        if attrs.constructor {
            constructors.extend(overloads);
            continue;
        }

        let name = attrs.name.clone().unwrap_or_else(|| {
            let ident = &method.sig.ident;
            LitStr::new(&ident.to_string(), ident.span())
        });
        let attributes = attrs
            .custom_attributes
            .expression(&vc_reflect_path, &function_target);

        match groups.iter_mut().find(|group| group.name.value() == name.value()) {
            Some(group) => {
                group.overloads.extend(overloads);
                group.attributes.push(attributes);
            }
            None => groups.push(MethodGroup {
                name,
                overloads,
                attributes: vec![attributes],
                docs: attrs.docs_expression(),
            }),
        }
    }

    for group in &groups {
        errors.extend(check_duplicates(&group.overloads, &group.name));
    }
    errors.extend(check_duplicates(
        &constructors,
        &LitStr::new("constructor", Span::call_site()),
    ));

    if let Some(err) = crate::utils::combine_errors(errors) {
        let err = err.into_compile_error();
        return quote! {
            #item
            #err
        };
    }

    let reflect_methods_ = crate::path::reflect_methods_(&vc_reflect_path);
    let type_path_ = crate::path::type_path_(&vc_reflect_path);
    let member_info_ = crate::path::member_info_(&vc_reflect_path);
    let function_info_ = crate::path::function_info_(&vc_reflect_path);
    let overload_ = crate::path::overload_(&vc_reflect_path);
    let macro_utils_ = crate::path::macro_utils_(&vc_reflect_path);

    let members = groups.iter().map(|group| {
        let name = &group.name;
        let overloads = group.overloads.iter().map(|o| o.to_overload(&overload_));
        let attributes = &group.attributes;
        let docs = &group.docs;
        quote! {
            #member_info_::new::<Self>(
                #name,
                #function_info_::new([#(#overloads),*]),
            )
            #(#attributes)*
            #docs
        }
    });

    let constructors_fn = if constructors.is_empty() {
        crate::utils::empty()
    } else {
        let overloads = constructors.iter().map(|o| o.to_overload(&overload_));
        quote! {
            fn reflect_constructors() -> #macro_utils_::Vec<#overload_> {
                #macro_utils_::vec![#(#overloads),*]
            }
        }
    };

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();
    let mut predicates: Vec<TokenStream> = Vec::new();
    if let Some(where_clause) = where_clause {
        predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
    }
    predicates.push(quote!(Self: #type_path_ + 'static));

    let reflect_impl = quote! {
        impl #impl_generics #reflect_methods_ for #self_ty
        where
            #(#predicates,)*
        {
            fn reflect_methods() -> #macro_utils_::Vec<#member_info_> {
                #macro_utils_::vec![#(#members),*]
            }

            #constructors_fn
        }
    };

    quote! {
        #item
        #reflect_impl
    }
}
