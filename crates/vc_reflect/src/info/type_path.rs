use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// Stable, human readable names for a type.
///
/// Unlike [`core::any::type_name`], the returned strings are defined by the
/// implementor, so they do not change between compiler versions.
///
/// Usually implemented with [`#[derive(TypePath)]`](crate::derive::TypePath)
/// or as part of [`#[derive(Reflected)]`](crate::derive::Reflected).
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::TypePath;
/// # use vc_reflect::derive::TypePath;
/// mod animals {
///     # use vc_reflect::derive::TypePath;
///     #[derive(TypePath)]
///     pub struct Cat;
///
///     #[derive(TypePath)]
///     #[reflect(type_path = "zoo::Pen")]
///     pub struct Pen<T>(pub T);
/// }
///
/// assert!(animals::Cat::type_path().ends_with("animals::Cat"));
/// assert_eq!(animals::Cat::type_name(), "Cat");
/// assert_eq!(<animals::Pen<u8>>::type_path(), "zoo::Pen<u8>");
/// assert_eq!(<animals::Pen<u8>>::type_name(), "Pen<u8>");
/// assert_eq!(<animals::Pen<u8>>::type_ident(), "Pen");
/// ```
pub trait TypePath: 'static {
    /// The full path, e.g. `my_crate::shapes::Circle<f32>`.
    fn type_path() -> &'static str;

    /// The path without module prefix, e.g. `Circle<f32>`.
    fn type_name() -> &'static str;

    /// The bare identifier, e.g. `Circle`.
    fn type_ident() -> &'static str;

    /// The module containing the type, e.g. `my_crate::shapes`.
    ///
    /// `None` for primitives and other types without a module.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

struct PathFns {
    path: fn() -> &'static str,
    name: fn() -> &'static str,
    ident: fn() -> &'static str,
    module: fn() -> Option<&'static str>,
}

impl PathFns {
    const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            path: T::type_path,
            name: T::type_name,
            ident: T::type_ident,
            module: T::module_path,
        }
    }
}

/// A copyable handle to a reflected type: its [`TypeId`] plus the
/// [`TypePath`] names of that type.
///
/// Two handles are equal exactly when their ids are.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::Type;
/// let ty = Type::of::<u32>();
///
/// assert!(ty.is::<u32>());
/// assert_eq!(ty.path(), "u32");
/// assert_eq!(ty.module_path(), None);
/// assert_eq!(ty, Type::of::<u32>());
/// assert_ne!(ty, Type::of::<i32>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    fns: &'static PathFns,
}

impl Type {
    /// Returns the handle of `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            fns: const { &PathFns::new::<T>() },
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Full path, see [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.fns.path)()
    }

    /// Short name, see [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.fns.name)()
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        (self.fns.ident)()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.fns.module)()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.path())
    }
}

// -----------------------------------------------------------------------------
// impl_type_fn

/// Adds `ty`, `type_id`, `is`, `type_path` and `type_name` to an info type.
macro_rules! impl_type_fn {
    ($field:ident) => {
        $crate::info::impl_type_fn!(self => self.$field);
    };
    ($self:ident => $expr:expr) => {
        /// The described [`Type`](crate::info::Type).
        #[inline]
        pub fn ty(&$self) -> $crate::info::Type {
            $expr
        }

        #[inline]
        pub fn type_id(&$self) -> ::core::any::TypeId {
            $expr.id()
        }

        /// Returns `true` if the described type is `T`.
        #[inline]
        pub fn is<T: ::core::any::Any>(&$self) -> bool {
            $expr.is::<T>()
        }

        #[inline]
        pub fn type_path(&$self) -> &'static str {
            $expr.path()
        }

        #[inline]
        pub fn type_name(&$self) -> &'static str {
            $expr.name()
        }
    };
}

pub(crate) use impl_type_fn;
