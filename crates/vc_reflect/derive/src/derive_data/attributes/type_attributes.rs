use proc_macro2::TokenStream;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, Ident, LitStr, Path, Token, Type, parenthesized};

use super::{CustomAttributes, ReflectDocs, duplicate, parse_reflect_attrs, unknown};

const EXPECTED: &str = "`@..`, `type_path`, `methods`, `nested`, `base`, `doc`";

/// The `#[reflect(...)]` attributes of a derived type.
///
/// - `@Expr`: an attribute value, checked against `TYPE` or `TYPE_TEMPLATE`.
/// - `type_path = "a::b::Name"`: overrides the module path and ident.
/// - `methods`: adds the members of the `#[reflect_methods]` impl block.
/// - `nested(Name = Type, ..)`: nested type members.
/// - `base = Type`: a base that is not a field.
/// - `doc = ".."` / `doc = false`: see `ReflectDocs`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub custom_attributes: CustomAttributes,
    pub type_path: Option<Path>,
    pub methods: bool,
    pub nested: Vec<(LitStr, Type)>,
    pub bases: Vec<Type>,
    pub docs: ReflectDocs,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        this.docs.collect_default(attrs)?;

        let mut custom = CustomAttributes::default();
        parse_reflect_attrs(attrs, &mut custom, |ident, input| {
            this.parse_item(ident, input)
        })?;
        this.custom_attributes = custom;

        Ok(this)
    }

    fn parse_item(&mut self, ident: &Ident, input: ParseStream) -> syn::Result<()> {
        if ident == "type_path" {
            if self.type_path.is_some() {
                return Err(duplicate(ident));
            }
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;
            let path: Path = lit.parse()?;
            if path.leading_colon.is_some() || path.segments.len() < 2 {
                return Err(syn::Error::new(
                    lit.span(),
                    "expected a path with a module, such as \"my_crate::Name\"",
                ));
            }
            self.type_path = Some(path);
        } else if ident == "methods" {
            if self.methods {
                return Err(duplicate(ident));
            }
            self.methods = true;
        } else if ident == "nested" {
            let content;
            parenthesized!(content in input);
            let pairs = content.parse_terminated(
                |input: ParseStream| {
                    let name: Ident = input.parse()?;
                    input.parse::<Token![=]>()?;
                    let ty: Type = input.parse()?;
                    Ok((LitStr::new(&name.to_string(), name.span()), ty))
                },
                Token![,],
            )?;
            self.nested.extend(pairs);
        } else if ident == "base" {
            input.parse::<Token![=]>()?;
            self.bases.push(input.parse()?);
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
