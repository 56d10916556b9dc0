use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, Lit};

use crate::path::fp::OptionFP;

#[derive(Debug, PartialEq, Eq)]
enum Source {
    /// `///` comments, only read with the `reflect_docs` feature.
    Comments,
    /// `#[reflect(doc = "..")]`, these replace the comments.
    Custom,
    /// `#[reflect(doc = false)]`, or the feature is off.
    Disabled,
}

/// Documentation attached to a reflected type, field or method.
#[derive(Debug)]
pub(crate) struct ReflectDocs {
    source: Source,
    lines: Vec<String>,
}

impl Default for ReflectDocs {
    fn default() -> Self {
        let source = match cfg!(feature = "reflect_docs") {
            true => Source::Comments,
            false => Source::Disabled,
        };
        Self {
            source,
            lines: Vec::new(),
        }
    }
}

fn string_literal(value: &Expr) -> Option<&Lit> {
    match value {
        Expr::Lit(ExprLit { lit, .. }) => Some(lit),
        _ => None,
    }
}

impl ReflectDocs {
    /// Reads the `#[doc = ".."]` attributes that `///` comments expand to.
    pub fn collect_default(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("doc")) {
            if self.source != Source::Comments {
                break;
            }
            let value = &attr.meta.require_name_value()?.value;
            match string_literal(value) {
                Some(Lit::Str(line)) => self.lines.push(line.value()),
                _ => return Err(syn::Error::new(value.span(), "expected `#[doc = \"...\"]`")),
            }
        }
        Ok(())
    }

    /// Handles `#[reflect(doc = "..")]` and `#[reflect(doc = false)]`.
    pub fn parse_custom(&mut self, value: &Expr) -> syn::Result<()> {
        match string_literal(value) {
            Some(Lit::Str(_)) if self.source == Source::Disabled => Ok(()),
            Some(Lit::Str(line)) => {
                if self.source == Source::Comments {
                    self.lines.clear();
                    self.source = Source::Custom;
                }
                self.lines.push(line.value());
                Ok(())
            }
            Some(Lit::Bool(flag)) if !flag.value => {
                self.lines.clear();
                self.source = Source::Disabled;
                Ok(())
            }
            Some(Lit::Bool(flag)) => Err(syn::Error::new(
                flag.span(),
                "`doc = true` is implied by the `reflect_docs` feature",
            )),
            _ => Err(syn::Error::new(value.span(), "expected a string or `false`")),
        }
    }

    /// `.with_docs(Some(".."))`, or nothing when there is no text.
    pub fn expression(&self) -> TokenStream {
        if self.source == Source::Disabled || self.lines.iter().all(String::is_empty) {
            return crate::utils::empty();
        }
        let text = self.lines.join("\n");
        quote!(.with_docs(#OptionFP::Some(#text)))
    }
}
