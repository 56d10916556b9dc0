// -----------------------------------------------------------------------------
// Modules

mod methods;
mod prototype;
mod reflected;
mod type_path;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use methods::impl_reflect_methods;
pub(crate) use prototype::impl_prototype;
pub(crate) use reflected::impl_reflected;
pub(crate) use type_path::impl_type_path;
