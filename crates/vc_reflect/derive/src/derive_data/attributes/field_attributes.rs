use proc_macro2::TokenStream;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, Ident, LitStr, Token};

use super::{CustomAttributes, ReflectDocs, duplicate, parse_reflect_attrs, unknown};

const EXPECTED: &str = "`@..`, `ignore`, `base`, `name`, `doc`";

/// The `#[reflect(...)]` attributes of a struct field.
///
/// - `@Expr`: an attribute value, checked against `VARIABLE`.
/// - `ignore`: the field is not reflected.
/// - `base`: the field is an embedded base instead of a variable.
/// - `name = ".."`: the member name, defaults to the field name or index.
/// - `doc = ".."` / `doc = false`: see `ReflectDocs`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub custom_attributes: CustomAttributes,
    pub ignore: bool,
    pub base: bool,
    pub name: Option<LitStr>,
    pub docs: ReflectDocs,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        this.docs.collect_default(attrs)?;

        let mut custom = CustomAttributes::default();
        parse_reflect_attrs(attrs, &mut custom, |ident, input| {
            this.parse_item(ident, input)
        })?;
        this.custom_attributes = custom;

        let conflict = match (this.ignore, this.base) {
            (true, true) => Some("`ignore` and `base`"),
            (true, false) if this.name.is_some() => Some("`ignore` and `name`"),
            (false, true) if this.name.is_some() => Some("`base` and `name`"),
            (_, true) if !this.custom_attributes.is_empty() => Some("`base` and `@..`"),
            _ => None,
        };
        match (conflict, attrs.first()) {
            (Some(pair), Some(attr)) => Err(syn::Error::new_spanned(
                attr,
                format!("{pair} cannot be used together"),
            )),
            _ => Ok(this),
        }
    }

    fn parse_item(&mut self, ident: &Ident, input: ParseStream) -> syn::Result<()> {
        if ident == "ignore" {
            if self.ignore {
                return Err(duplicate(ident));
            }
            self.ignore = true;
        } else if ident == "base" {
            if self.base {
                return Err(duplicate(ident));
            }
            self.base = true;
        } else if ident == "name" {
            if self.name.is_some() {
                return Err(duplicate(ident));
            }
            input.parse::<Token![=]>()?;
            self.name = Some(input.parse()?);
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
