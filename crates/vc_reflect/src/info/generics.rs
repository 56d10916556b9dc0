use alloc::vec::Vec;
use core::fmt;

use crate::info::{Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// ConstValue

/// The value bound to a const generic parameter.
///
/// Integers are widened, so `3_u8` and `3_usize` both read as `UInt(3)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConstValue {
    Bool(bool),
    Char(char),
    Int(i128),
    UInt(u128),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
        }
    }
}

/// Types allowed as the type of a const generic parameter.
pub trait ConstParamType: TypePath + Copy {
    fn to_const_value(self) -> ConstValue;
}

impl ConstParamType for bool {
    #[inline]
    fn to_const_value(self) -> ConstValue {
        ConstValue::Bool(self)
    }
}

impl ConstParamType for char {
    #[inline]
    fn to_const_value(self) -> ConstValue {
        ConstValue::Char(self)
    }
}

macro_rules! const_param_int {
    ($variant:ident as $wide:ty => $($ty:ty),*) => {$(
        impl ConstParamType for $ty {
            #[inline]
            fn to_const_value(self) -> ConstValue {
                ConstValue::$variant(self as $wide)
            }
        }
    )*};
}

const_param_int!(Int as i128 => i8, i16, i32, i64, i128, isize);
const_param_int!(UInt as u128 => u8, u16, u32, u64, u128, usize);

// -----------------------------------------------------------------------------
// Parameters

/// A type parameter and the argument it was instantiated with.
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    name: &'static str,
    ty: Type,
}

impl TypeParamInfo {
    impl_type_fn!(ty);

    /// Parameter `name` bound to `T`.
    #[inline]
    pub const fn new<T: TypePath + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// A const parameter, its declared type and its instantiated value.
#[derive(Clone, Debug)]
pub struct ConstParamInfo {
    name: &'static str,
    ty: Type,
    value: ConstValue,
}

impl ConstParamInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: ConstParamType>(name: &'static str, value: T) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            value: value.to_const_value(),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn value(&self) -> ConstValue {
        self.value
    }
}

/// Either kind of generic parameter.
#[derive(Clone, Debug)]
pub enum GenericInfo {
    Type(TypeParamInfo),
    Const(ConstParamInfo),
}

impl GenericInfo {
    impl_type_fn!(self => match self {
        Self::Type(param) => param.ty,
        Self::Const(param) => param.ty,
    });

    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Type(param) => param.name,
            Self::Const(param) => param.name,
        }
    }

    /// `Some` for a type parameter.
    #[inline]
    pub const fn as_type(&self) -> Option<&TypeParamInfo> {
        if let Self::Type(param) = self { Some(param) } else { None }
    }

    /// `Some` for a const parameter.
    #[inline]
    pub const fn as_const(&self) -> Option<&ConstParamInfo> {
        if let Self::Const(param) = self { Some(param) } else { None }
    }
}

impl From<TypeParamInfo> for GenericInfo {
    #[inline]
    fn from(param: TypeParamInfo) -> Self {
        Self::Type(param)
    }
}

impl From<ConstParamInfo> for GenericInfo {
    #[inline]
    fn from(param: ConstParamInfo) -> Self {
        Self::Const(param)
    }
}

// -----------------------------------------------------------------------------
// Generics

/// Type and const parameters of a template instantiation, in declaration
/// order. Lifetimes are left out.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::{ConstParamInfo, ConstValue, Generics, TypeParamInfo};
/// let generics = Generics::new()
///     .with(TypeParamInfo::new::<f32>("T"))
///     .with(ConstParamInfo::new::<usize>("N", 3));
///
/// assert_eq!(generics.len(), 2);
/// assert!(generics.get_named("T").unwrap().is::<f32>());
///
/// let n = generics.get_named("N").and_then(|p| p.as_const()).unwrap();
/// assert_eq!(n.value(), ConstValue::UInt(3));
/// assert_eq!(n.value().to_string(), "3");
/// ```
#[derive(Clone, Default, Debug)]
pub struct Generics {
    params: Vec<GenericInfo>,
}

impl Generics {
    #[inline]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Appends `param` and returns the list.
    #[inline]
    pub fn with(mut self, param: impl Into<GenericInfo>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn get_named(&self, name: &str) -> Option<&GenericInfo> {
        self.params.iter().find(|param| param.name() == name)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&GenericInfo> {
        self.params.get(index)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, GenericInfo> {
        self.params.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<'a> IntoIterator for &'a Generics {
    type Item = &'a GenericInfo;
    type IntoIter = core::slice::Iter<'a, GenericInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
