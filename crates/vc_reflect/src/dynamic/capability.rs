use vc_ptr::{ErasedBox, Ptr};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unique {}
    impl Sealed for super::Cloneable {}
}

/// A type-level flag selecting what a [`Dyn`](crate::dynamic::Dyn) can do
/// besides dispatching.
pub trait Capability: sealed::Sealed + Send + Sync + 'static {
    /// Whether instances can be cloned.
    const CLONEABLE: bool;
}

/// Move-only instances. The default.
#[derive(Debug)]
pub enum Unique {}

/// Instances clone their object through the vtable. Requires `T: Clone`.
#[derive(Debug)]
pub enum Cloneable {}

impl Capability for Unique {
    const CLONEABLE: bool = false;
}

impl Capability for Cloneable {
    const CLONEABLE: bool = true;
}

/// Provides the clone function stored in the vtable of `T`.
pub trait CloneWith<T>: Capability {
    fn clone_fn() -> Option<fn(Ptr<'_>) -> ErasedBox>;
}

impl<T: Send + Sync + 'static> CloneWith<T> for Unique {
    #[inline(always)]
    fn clone_fn() -> Option<fn(Ptr<'_>) -> ErasedBox> {
        None
    }
}

impl<T: Clone + Send + Sync + 'static> CloneWith<T> for Cloneable {
    #[inline(always)]
    fn clone_fn() -> Option<fn(Ptr<'_>) -> ErasedBox> {
        Some(ErasedBox::clone_as::<T>)
    }
}

/// Conversions allowed between capabilities.
///
/// A `Cloneable` destination needs a `Cloneable` source:
///
/// ```compile_fail
/// # use vc_reflect::dynamic::{Cloneable, ConvertFrom, Unique};
/// fn check<D: ConvertFrom<S>, S: vc_reflect::dynamic::Capability>() {}
/// check::<Cloneable, Unique>();
/// ```
pub trait ConvertFrom<C: Capability>: Capability {}

impl ConvertFrom<Unique> for Unique {}
impl ConvertFrom<Cloneable> for Unique {}
impl ConvertFrom<Cloneable> for Cloneable {}
