/// Implement `docs` and `with_docs`.
macro_rules! impl_docs_fn {
    ($field:ident) => {
        /// Returns the documentation, if `reflect_docs` is enabled and docs are present.
        ///
        /// Always `None` without the `reflect_docs` feature, so callers do not
        /// need their own `cfg`.
        #[inline(always)]
        pub const fn docs(&self) -> Option<&'static str> {
            #[cfg(not(feature = "reflect_docs"))]
            return None;
            #[cfg(feature = "reflect_docs")]
            return self.$field;
        }

        /// Replaces the documentation.
        ///
        /// Used by the proc-macro crate.
        #[cfg(feature = "reflect_docs")]
        #[inline]
        pub fn with_docs(mut self, $field: Option<&'static str>) -> Self {
            self.$field = $field;
            self
        }
    };
}

pub(super) use impl_docs_fn;
