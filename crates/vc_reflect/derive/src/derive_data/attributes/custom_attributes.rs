use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::parse::ParseStream;
use syn::{Expr, Path, Token};

/// User attribute expressions, written `#[reflect(@Expr)]`.
///
/// This corresponds to `vc_reflect::info::Attributes`.
#[derive(Default, Debug)]
pub(crate) struct CustomAttributes {
    attributes: Vec<Expr>,
}

impl CustomAttributes {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Parses one `@` attribute.
    ///
    /// Examples:
    /// - `#[reflect(@Hidden)]`
    /// - `#[reflect(@Range(0..10))]`
    pub fn parse_inner_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        input.parse::<Token![@]>()?;
        self.attributes.push(input.parse()?);
        Ok(())
    }

    /// Returns nothing if empty, otherwise
    ///
    /// ```ignore
    /// .with_attributes(
    ///     _path_::Attributes::new()
    ///         .with::<{ _path_::Category::VARIABLE.bits() }, _>( ... )
    /// )
    /// ```
    ///
    /// `target` is the name of a `Category` constant. The target is checked
    /// when the generated code is compiled.
    pub fn expression(&self, vc_reflect_path: &Path, target: &Ident) -> TokenStream {
        if self.attributes.is_empty() {
            return crate::utils::empty();
        }

        let attributes_ = crate::path::attributes_(vc_reflect_path);
        let category_ = crate::path::category_(vc_reflect_path);

        let with_attributes = self.attributes.iter().map(|value| {
            quote! {
                .with::<{ #category_::#target.bits() }, _>(#value)
            }
        });

        quote! {
            .with_attributes(
                #attributes_::new()
                    #(#with_attributes)*
            )
        }
    }
}
