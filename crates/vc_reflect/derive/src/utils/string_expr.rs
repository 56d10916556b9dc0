use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

enum Part {
    /// Usable inside `concat!`: a literal or a macro like `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` only known at runtime.
    Str(TokenStream),
    /// A `String` built at runtime.
    String(TokenStream),
}

/// A string in generated code, assembled from pieces.
///
/// When every piece is constant the result is a single `concat!`,
/// otherwise the pieces are joined at runtime.
#[derive(Default)]
pub(crate) struct StringExpr {
    parts: Vec<Part>,
}

impl StringExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a literal.
    pub fn lit(mut self, text: &str) -> Self {
        self.parts.push(Part::Const(text.to_token_stream()));
        self
    }

    /// Appends a constant string expression.
    pub fn constant(mut self, tokens: TokenStream) -> Self {
        self.parts.push(Part::Const(tokens));
        self
    }

    /// Appends a `&'static str` computed at runtime.
    pub fn runtime_str(mut self, tokens: TokenStream) -> Self {
        self.parts.push(Part::Str(tokens));
        self
    }

    /// Appends a `String` computed at runtime.
    pub fn runtime_string(mut self, tokens: TokenStream) -> Self {
        self.parts.push(Part::String(tokens));
        self
    }

    pub fn append(mut self, other: StringExpr) -> Self {
        self.parts.extend(other.parts);
        self
    }

    fn is_const(&self) -> bool {
        self.parts.iter().all(|part| matches!(part, Part::Const(_)))
    }

    fn pieces(self) -> impl Iterator<Item = TokenStream> {
        self.parts.into_iter().map(|part| match part {
            Part::Const(tokens) | Part::Str(tokens) => tokens,
            Part::String(tokens) => quote!(&#tokens as &str),
        })
    }

    fn joined(self, vc_reflect_path: &syn::Path) -> TokenStream {
        let macro_utils_ = crate::path::macro_utils_(vc_reflect_path);
        let pieces = self.pieces();
        quote!(#macro_utils_::__concat(&[#(#pieces),*]))
    }

    /// Tokens of a `&'static str`. Only valid for constant strings.
    pub fn into_borrowed(self) -> TokenStream {
        debug_assert!(self.is_const(), "runtime string used as `&'static str`");
        let pieces = self.pieces();
        quote!(::core::concat!(#(#pieces),*))
    }

    /// Tokens of a `String`.
    pub fn into_owned(self, vc_reflect_path: &syn::Path) -> TokenStream {
        if self.is_const() {
            let macro_utils_ = crate::path::macro_utils_(vc_reflect_path);
            let text = self.into_borrowed();
            quote!(#macro_utils_::ToOwned::to_owned(#text))
        } else {
            self.joined(vc_reflect_path)
        }
    }
}
