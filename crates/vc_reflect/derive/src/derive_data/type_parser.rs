use proc_macro2::Span;
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{ConstParam, GenericParam, Generics, Ident, LitStr, Path, TypeParam};

use crate::utils::StringExpr;

/// The names of a derived type: ident, optional custom path and generics.
pub(crate) struct TypeParser<'a> {
    ident: &'a Ident,
    custom_path: Option<Path>,
    generics: &'a Generics,
}

impl<'a> TypeParser<'a> {
    pub fn new(ident: &'a Ident, custom_path: Option<Path>, generics: &'a Generics) -> Self {
        Self {
            ident,
            custom_path,
            generics,
        }
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    /// Whether the type has type or const parameters.
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Rejects lifetime parameters, reflected types are `'static`.
    pub fn check_lifetimes(&self) -> syn::Result<()> {
        match self.generics.lifetimes().next() {
            Some(lifetime) => Err(syn::Error::new(
                lifetime.span(),
                "reflected types cannot have lifetime parameters",
            )),
            None => Ok(()),
        }
    }

    /// This name is used in `impl ... for #real_ident {...}`.
    #[inline]
    pub fn real_ident(&self) -> &'a Ident {
        self.ident
    }

    fn custom_ident(&self) -> &Ident {
        self.custom_path
            .as_ref()
            .and_then(|path| path.segments.last())
            .map(|segment| &segment.ident)
            .unwrap_or(self.ident)
    }

    pub fn type_ident(&self) -> StringExpr {
        StringExpr::new().lit(&self.custom_ident().to_string())
    }

    /// The custom path minus its last segment, or `module_path!()`.
    pub fn module_path(&self) -> StringExpr {
        let Some(path) = &self.custom_path else {
            return StringExpr::new().constant(quote!(::core::module_path!()));
        };
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let module = segments[..segments.len().saturating_sub(1)].join("::");
        StringExpr::new().constant(LitStr::new(&module, path.span()).to_token_stream())
    }

    /// `<A, B, N>`, each type argument rendered with `TypePath::#accessor`.
    fn generic_args(&self, accessor: &str, vc_reflect_path: &Path) -> StringExpr {
        let type_path_ = crate::path::type_path_(vc_reflect_path);
        let macro_utils_ = crate::path::macro_utils_(vc_reflect_path);
        let accessor = Ident::new(accessor, Span::call_site());

        let mut out = StringExpr::new().lit("<");
        let args = self
            .generics
            .params
            .iter()
            .filter(|param| !matches!(param, GenericParam::Lifetime(_)));
        for (index, param) in args.enumerate() {
            if index > 0 {
                out = out.lit(", ");
            }
            out = match param {
                GenericParam::Type(TypeParam { ident, .. }) => {
                    out.runtime_str(quote!(<#ident as #type_path_>::#accessor()))
                }
                GenericParam::Const(ConstParam { ident, ty, .. }) => {
                    out.runtime_string(quote!(<#ty as #macro_utils_::ToString>::to_string(&#ident)))
                }
                GenericParam::Lifetime(_) => out,
            };
        }
        out.lit(">")
    }

    /// `Name<A, B>` for generic types, `Name` otherwise.
    pub fn type_name(&self, vc_reflect_path: &Path) -> StringExpr {
        let name = self.type_ident();
        match self.impl_with_generic() {
            true => name.append(self.generic_args("type_name", vc_reflect_path)),
            false => name,
        }
    }

    /// `module::Name<a::A, b::B>` for generic types, `module::Name` otherwise.
    pub fn type_path(&self, vc_reflect_path: &Path) -> StringExpr {
        let path = self.module_path().lit("::").append(self.type_ident());
        match self.impl_with_generic() {
            true => path.append(self.generic_args("type_path", vc_reflect_path)),
            false => path,
        }
    }
}
