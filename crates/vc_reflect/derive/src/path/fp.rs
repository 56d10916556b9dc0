//! Fully qualified paths of `core` items, safe to emit next to user code
//! that may shadow the prelude.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! fully_qualified {
    ($($name:ident => $path:path;)*) => {
        $(
            pub(crate) struct $name;

            impl ToTokens for $name {
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!($path));
                }
            }
        )*
    };
}

fully_qualified! {
    OptionFP => ::core::option::Option;
    SendFP => ::core::marker::Send;
    SyncFP => ::core::marker::Sync;
}
