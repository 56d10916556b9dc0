//! Small helpers shared by the macro implementations.

use proc_macro2::TokenStream;

mod string_expr;
mod substitute;

pub(crate) use string_expr::StringExpr;
pub(crate) use substitute::{ElidedLifetimes, TypeSubstitution, mentions_self};

/// An empty token stream, for optional parts of generated code.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Folds several errors into one, so all of them are reported.
pub(crate) fn combine_errors(errors: impl IntoIterator<Item = syn::Error>) -> Option<syn::Error> {
    errors.into_iter().reduce(|mut all, err| {
        all.combine(err);
        all
    })
}
