use std::collections::HashMap;

use proc_macro2::{Span, TokenStream, TokenTree};
use quote::ToTokens;
use syn::visit_mut::{self, VisitMut};
use syn::{Ident, Lifetime, Type, TypeReference};

// -----------------------------------------------------------------------------
// TypeSubstitution

/// Replaces generic parameters by concrete types, e.g. `Vec<T>` -> `Vec<u8>`.
pub(crate) struct TypeSubstitution {
    map: HashMap<Ident, Type>,
}

impl TypeSubstitution {
    pub fn new(params: impl IntoIterator<Item = (Ident, Type)>) -> Self {
        Self {
            map: params.into_iter().collect(),
        }
    }

    pub fn apply(&mut self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        self.visit_type_mut(&mut ty);
        ty
    }
}

impl VisitMut for TypeSubstitution {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(type_path) = ty
            && type_path.qself.is_none()
            && let Some(ident) = type_path.path.get_ident()
            && let Some(replacement) = self.map.get(ident)
        {
            *ty = replacement.clone();
            return;
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

// -----------------------------------------------------------------------------
// ElidedLifetimes

/// Names every elided lifetime, e.g. `&str` -> `&'a str` and `Ptr<'_>` -> `Ptr<'a>`.
///
/// Used on return types, which take the lifetime of `self` when elided.
pub(crate) struct ElidedLifetimes {
    lifetime: Lifetime,
}

impl ElidedLifetimes {
    pub fn new(name: &str) -> Self {
        Self {
            lifetime: Lifetime::new(name, Span::call_site()),
        }
    }

    pub fn apply(&mut self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        self.visit_type_mut(&mut ty);
        ty
    }
}

impl VisitMut for ElidedLifetimes {
    fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
        if reference.lifetime.is_none() {
            reference.lifetime = Some(self.lifetime.clone());
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        if lifetime.ident == "_" {
            *lifetime = self.lifetime.clone();
        }
    }
}

// -----------------------------------------------------------------------------
// Self detection

/// Returns `true` if the tokens mention `Self`.
pub(crate) fn mentions_self(tokens: &impl ToTokens) -> bool {
    fn scan(stream: TokenStream) -> bool {
        stream.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => ident == "Self",
            TokenTree::Group(group) => scan(group.stream()),
            _ => false,
        })
    }
    scan(tokens.to_token_stream())
}
