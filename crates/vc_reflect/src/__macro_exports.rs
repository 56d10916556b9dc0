//! Items used by the code generated in `vc_reflect_derive`.
//!
//! Generated code reaches everything through this module, so users of the
//! macros do not need `alloc` or `vc_ptr` in scope.

#[doc(hidden)]
pub mod macro_utils {
    pub use alloc::borrow::ToOwned;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;

    pub use vc_ptr::{ErasedBox, Ptr, PtrMut};

    pub use crate::impls::concat as __concat;
}
