use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, ImplGenerics, Path, TypeGenerics};

use super::{TypeAttributes, TypeParser};

/// Type level data shared by every derive: the crate path, the parsed
/// `#[reflect(...)]` attributes and the naming of the type.
pub(crate) struct ReflectMeta<'a> {
    krate: Path,
    attrs: TypeAttributes,
    names: TypeParser<'a>,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, names: TypeParser<'a>) -> Self {
        Self {
            krate: crate::path::vc_reflect(),
            attrs,
            names,
        }
    }

    /// Path of `vc_reflect` as seen from the deriving crate.
    #[inline]
    pub fn vc_reflect_path(&self) -> &Path {
        &self.krate
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn names(&self) -> &TypeParser<'a> {
        &self.names
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.names.impl_with_generic()
    }

    #[inline]
    pub fn real_ident(&self) -> &syn::Ident {
        self.names.real_ident()
    }

    /// `.with_generics(Generics::new().with(..)..)` listing every type and
    /// const parameter, empty for a non-generic type.
    pub fn with_generics_expression(&self) -> TokenStream {
        if !self.impl_with_generic() {
            return crate::utils::empty();
        }

        let krate = &self.krate;
        let generics_ = crate::path::generics_(krate);
        let type_param_ = crate::path::type_param_info_(krate);
        let const_param_ = crate::path::const_param_info_(krate);

        let mut pushes = TokenStream::new();
        for param in &self.names.generics().params {
            let pushed = match param {
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    let name = ident.to_string();
                    quote!(#type_param_::new::<#ident>(#name))
                }
                GenericParam::Const(param) => {
                    let (ident, ty) = (&param.ident, &param.ty);
                    let name = ident.to_string();
                    quote!(#const_param_::new::<#ty>(#name, #ident))
                }
                GenericParam::Lifetime(_) => continue,
            };
            pushes.extend(quote!(.with(#pushed)));
        }

        quote!(.with_generics(#generics_::new() #pushes))
    }

    /// `split_for_impl` with a where clause that also requires `TypePath`
    /// of each type parameter and appends `extra`.
    pub fn split_generics(
        &self,
        extra: impl IntoIterator<Item = TokenStream>,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let type_path_ = crate::path::type_path_(&self.krate);
        let generics = self.names.generics();
        let (impl_generics, ty_generics, user_where) = generics.split_for_impl();

        let user = user_where
            .into_iter()
            .flat_map(|clause| clause.predicates.iter().map(ToTokens::to_token_stream));
        let bounds = generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(#ident: #type_path_)
        });
        let predicates: Vec<TokenStream> = user.chain(bounds).chain(extra).collect();

        let where_clause = match predicates.is_empty() {
            true => crate::utils::empty(),
            false => quote!(where #(#predicates,)*),
        };
        (impl_generics, ty_generics, where_clause)
    }
}
