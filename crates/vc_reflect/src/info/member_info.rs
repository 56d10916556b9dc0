use core::any::TypeId;

use crate::info::docs_macro::impl_docs_fn;
use crate::info::{Attribute, Attributes, Category, FunctionInfo, NestedTypeInfo};
use crate::info::{Type, TypePath, VariableInfo};
use crate::invoke::{ArgList, InvokeError, Output, Receiver};

// -----------------------------------------------------------------------------
// MemberKind

/// What a member is.
#[derive(Clone, Debug)]
pub enum MemberKind {
    Type(NestedTypeInfo),
    Variable(VariableInfo),
    Function(FunctionInfo),
}

impl MemberKind {
    /// The single [`Category`] of this kind.
    #[inline]
    pub const fn category(&self) -> Category {
        match self {
            Self::Type(_) => Category::TYPE,
            Self::Variable(_) => Category::VARIABLE,
            Self::Function(_) => Category::FUNCTION,
        }
    }
}

impl From<NestedTypeInfo> for MemberKind {
    #[inline]
    fn from(value: NestedTypeInfo) -> Self {
        Self::Type(value)
    }
}

impl From<VariableInfo> for MemberKind {
    #[inline]
    fn from(value: VariableInfo) -> Self {
        Self::Variable(value)
    }
}

impl From<FunctionInfo> for MemberKind {
    #[inline]
    fn from(value: FunctionInfo) -> Self {
        Self::Function(value)
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A named member of a reflected type.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::{Category, MemberInfo, VariableInfo};
/// # use vc_reflect::derive::TypePath;
/// #[derive(TypePath)]
/// struct Size {
///     width: u32,
/// }
///
/// let width = MemberInfo::new::<Size>(
///     "width",
///     VariableInfo::field(|s: &Size| &s.width, |s| &mut s.width),
/// );
///
/// assert_eq!(width.name(), "width");
/// assert_eq!(width.category(), Category::VARIABLE);
/// assert!(width.declaring().is::<Size>());
/// assert!(width.as_variable().is_ok());
/// assert!(width.as_function().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct MemberInfo {
    name: &'static str,
    declaring: Type,
    kind: MemberKind,
    attributes: Attributes,
    #[cfg(feature = "reflect_docs")]
    docs: Option<&'static str>,
}

impl MemberInfo {
    impl_docs_fn!(docs);

    /// Creates a member of the type `D`.
    #[inline]
    pub fn new<D: TypePath + ?Sized>(name: &'static str, kind: impl Into<MemberKind>) -> Self {
        Self::with_declaring(name, Type::of::<D>(), kind.into())
    }

    #[inline]
    pub(crate) fn with_declaring(name: &'static str, declaring: Type, kind: MemberKind) -> Self {
        Self {
            name,
            declaring,
            kind,
            attributes: Attributes::new(),
            #[cfg(feature = "reflect_docs")]
            docs: None,
        }
    }

    /// Appends an attribute.
    ///
    /// # Panics
    ///
    /// Panics if `A` cannot be attached to this member's category.
    #[track_caller]
    pub fn with_attribute<A: Attribute>(mut self, attribute: A) -> Self {
        self.attributes.push_checked(self.category(), attribute);
        self
    }

    /// Appends a list of attributes.
    ///
    /// # Panics
    ///
    /// Panics if any attribute cannot be attached to this member's category.
    #[track_caller]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        attributes.assert_valid_for(self.category());
        self.attributes.extend(&attributes);
        self
    }

    /// The member name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type this member was declared in.
    ///
    /// For members inherited from a base this is the base type.
    #[inline(always)]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    #[inline(always)]
    pub const fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// The single [`Category`] of this member.
    #[inline]
    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    #[inline(always)]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the nested type, or an error naming the actual category.
    pub fn as_type(&self) -> Result<&NestedTypeInfo, InvokeError> {
        match &self.kind {
            MemberKind::Type(info) => Ok(info),
            _ => Err(self.kind_mismatch(Category::TYPE)),
        }
    }

    /// Returns the variable, or an error naming the actual category.
    pub fn as_variable(&self) -> Result<&VariableInfo, InvokeError> {
        match &self.kind {
            MemberKind::Variable(info) => Ok(info),
            _ => Err(self.kind_mismatch(Category::VARIABLE)),
        }
    }

    /// Returns the overload set, or an error naming the actual category.
    pub fn as_function(&self) -> Result<&FunctionInfo, InvokeError> {
        match &self.kind {
            MemberKind::Function(info) => Ok(info),
            _ => Err(self.kind_mismatch(Category::FUNCTION)),
        }
    }

    #[inline]
    fn kind_mismatch(&self, expect: Category) -> InvokeError {
        InvokeError::KindMismatch {
            expect,
            actual: self.category(),
        }
    }

    /// Invokes the member, see [`invoke`](crate::invoke::invoke).
    #[inline]
    pub fn invoke<'a>(
        &self,
        this: Receiver<'a>,
        type_args: Option<&[TypeId]>,
        args: ArgList,
    ) -> Result<Output<'a>, InvokeError> {
        crate::invoke::invoke(self, this, type_args, args)
    }
}
