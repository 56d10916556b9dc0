//! Parsing of `#[reflect(...)]` attributes on types, fields and methods.

// -----------------------------------------------------------------------------
// Modules

mod custom_attributes;
mod field_attributes;
mod method_attributes;
mod reflect_docs;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

use custom_attributes::CustomAttributes;
use reflect_docs::ReflectDocs;

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use method_attributes::MethodAttributes;
pub(crate) use type_attributes::TypeAttributes;

use syn::parse::ParseStream;
use syn::{Attribute, Ident, Token};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Runs `parse_item` for each comma separated item of every `#[reflect(...)]`.
///
/// `@Expr` items go to `custom`, every other item starts with an identifier
/// which is passed to `parse_item` with the stream positioned after it.
fn parse_reflect_attrs(
    attrs: &[Attribute],
    custom: &mut CustomAttributes,
    mut parse_item: impl FnMut(&Ident, ParseStream) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_args_with(|input: ParseStream| {
            while !input.is_empty() {
                if input.peek(Token![@]) {
                    custom.parse_inner_stream(input)?;
                } else {
                    let ident = input.call(syn::ext::IdentExt::parse_any)?;
                    parse_item(&ident, input)?;
                }
                if input.is_empty() {
                    break;
                }
                input.parse::<Token![,]>()?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn unknown(ident: &Ident, expected: &str) -> syn::Error {
    syn::Error::new(
        ident.span(),
        format!("unknown reflect attribute `{ident}`, expected one of: {expected}"),
    )
}

fn duplicate(ident: &Ident) -> syn::Error {
    syn::Error::new(ident.span(), format!("`{ident}` is specified more than once"))
}
