use proc_macro2::TokenStream;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, LitStr, Token, Type, parenthesized};

use super::{CustomAttributes, ReflectDocs, duplicate, parse_reflect_attrs, unknown};

const EXPECTED: &str = "`@..`, `name`, `constructor`, `instantiate`, `skip`, `doc`";

/// The `#[reflect(...)]` attributes of a method in a `#[reflect_methods]` block.
///
/// - `@Expr`: an attribute value, checked against `FUNCTION`.
/// - `name = ".."`: the function member this method is an overload of.
/// - `constructor`: registers the method as a constructor instead of a member.
/// - `instantiate(A, B)`: one instantiation of a generic method, repeatable.
/// - `skip`: the method is not reflected.
/// - `doc = ".."` / `doc = false`: see `ReflectDocs`.
#[derive(Default)]
pub(crate) struct MethodAttributes {
    pub custom_attributes: CustomAttributes,
    pub name: Option<LitStr>,
    pub constructor: bool,
    pub instantiations: Vec<Vec<Type>>,
    pub skip: bool,
    pub docs: ReflectDocs,
}

impl MethodAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        this.docs.collect_default(attrs)?;

        let mut custom = CustomAttributes::default();
        parse_reflect_attrs(attrs, &mut custom, |ident, input| {
            this.parse_item(ident, input)
        })?;
        this.custom_attributes = custom;

        if this.constructor
            && (this.name.is_some() || !this.custom_attributes.is_empty())
            && let Some(attr) = attrs.first()
        {
            return Err(syn::Error::new_spanned(
                attr,
                "a constructor is not a member, it has no `name` or `@..` attributes",
            ));
        }
        Ok(this)
    }

    fn parse_item(&mut self, ident: &Ident, input: ParseStream) -> syn::Result<()> {
        if ident == "name" {
            if self.name.is_some() {
                return Err(duplicate(ident));
            }
            input.parse::<Token![=]>()?;
            self.name = Some(input.parse()?);
        } else if ident == "constructor" {
            if self.constructor {
                return Err(duplicate(ident));
            }
            self.constructor = true;
        } else if ident == "instantiate" {
            let content;
            parenthesized!(content in input);
            let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
            if types.is_empty() {
                return Err(syn::Error::new(ident.span(), "expected at least one type"));
            }
            self.instantiations.push(types.into_iter().collect());
        } else if ident == "skip" {
            self.skip = true;
        } else if ident == "doc" {
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            self.docs.parse_custom(&value)?;
        } else {
            return Err(unknown(ident, EXPECTED));
        }
        Ok(())
    }

    /// See [`ReflectDocs::expression`].
    #[inline]
    pub fn docs_expression(&self) -> TokenStream {
        self.docs.expression()
    }
}
