use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::OnceLock;

use crate::info::docs_macro::impl_docs_fn;
use crate::info::{Attributes, BaseInfo, Category, FunctionInfo, Generics, MemberInfo};
use crate::info::{Type, TypeInfoBuilder, TypePath, impl_type_fn};
use crate::invoke::{ArgList, InvokeError, Output, Receiver, ReceiverKind};
use crate::seq::Seq;

// -----------------------------------------------------------------------------
// TypeInfo

/// The descriptor of a reflected type.
///
/// Obtained with [`Reflected::type_info`](crate::info::Reflected::type_info)
/// and always `'static`. Built once per type with [`TypeInfo::builder`],
/// usually by [`#[derive(Reflected)]`](crate::derive::Reflected).
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::{Reflected, reflect_methods};
/// use vc_reflect::info::{Category, Reflected};
///
/// #[derive(Reflected)]
/// #[reflect(methods)]
/// struct Animal {
///     legs: u8,
/// }
///
/// #[reflect_methods]
/// impl Animal {
///     fn legs(&self) -> u8 {
///         self.legs
///     }
/// }
///
/// #[derive(Reflected)]
/// struct Bird {
///     #[reflect(base)]
///     animal: Animal,
///     wingspan: f32,
/// }
///
/// let info = Bird::type_info();
/// assert_eq!(info.category(), Category::TYPE);
/// assert_eq!(info.bases().len(), 1);
///
/// // own members only
/// let own: Vec<_> = info.members().iter().map(|m| m.name()).collect();
/// assert_eq!(own, ["wingspan"]);
///
/// // bases first, then own members
/// let all: Vec<_> = info.all_members().iter().map(|m| m.name()).collect();
/// assert_eq!(all, ["legs", "legs", "wingspan"]);
/// ```
pub struct TypeInfo {
    pub(super) ty: Type,
    pub(super) category: Category,
    pub(super) generics: Generics,
    pub(super) bases: Box<[BaseInfo]>,
    pub(super) members: Seq<MemberInfo>,
    pub(super) constructors: Option<FunctionInfo>,
    pub(super) attributes: Attributes,
    pub(super) all_members: OnceLock<Seq<&'static MemberInfo>>,
    #[cfg(feature = "reflect_docs")]
    pub(super) docs: Option<&'static str>,
}

impl TypeInfo {
    impl_type_fn!(ty);
    impl_docs_fn!(docs);

    /// Starts building the descriptor of `T`.
    #[inline]
    pub fn builder<T: TypePath + ?Sized>() -> TypeInfoBuilder {
        TypeInfoBuilder::new(Type::of::<T>())
    }

    /// Either [`Category::TYPE`] or [`Category::TYPE_TEMPLATE`].
    #[inline(always)]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns `true` for an instantiation of a generic type.
    #[inline]
    pub fn is_template(&self) -> bool {
        self.category == Category::TYPE_TEMPLATE
    }

    /// The generic parameters and the arguments they were instantiated with.
    #[inline(always)]
    pub const fn generics(&self) -> &Generics {
        &self.generics
    }

    /// The direct bases, in declaration order.
    #[inline]
    pub fn bases(&self) -> &[BaseInfo] {
        &self.bases
    }

    /// The members declared by this type, in declaration order.
    #[inline(always)]
    pub const fn members(&self) -> &Seq<MemberInfo> {
        &self.members
    }

    /// The members of every base, depth-first in declaration order, followed
    /// by the members declared by this type.
    ///
    /// Members with equal names are all listed, nothing is hidden.
    pub fn all_members(&'static self) -> &'static Seq<&'static MemberInfo> {
        self.all_members.get_or_init(|| {
            let inherited: Seq<Seq<&'static MemberInfo>> = self
                .bases
                .iter()
                .map(|base| base.info().all_members().clone())
                .collect();
            let own: Seq<&'static MemberInfo> = self.members.iter().collect();
            inherited.flatten().concat(&own)
        })
    }

    /// The constructor overloads, `None` if the type has none.
    #[inline(always)]
    pub const fn constructors(&self) -> Option<&FunctionInfo> {
        self.constructors.as_ref()
    }

    #[inline(always)]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the member declared by this type with the given name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.find(|m| m.name() == name)
    }

    /// Looks a member up by name in [`all_members`](Self::all_members).
    ///
    /// There is no hiding: a base member shadows a derived member of the
    /// same name because bases come first.
    pub fn find_member(&'static self, name: &str) -> Option<&'static MemberInfo> {
        self.all_members().find(|m| m.name() == name).copied()
    }

    /// Returns `true` if `type_id` is this type or one of its transitive bases.
    pub fn is_derived_from(&self, type_id: TypeId) -> bool {
        self.ty.id() == type_id || self.bases.iter().any(|base| base.info().is_derived_from(type_id))
    }

    /// Creates an instance through a constructor overload.
    pub fn construct(
        &self,
        type_args: Option<&[TypeId]>,
        args: ArgList,
    ) -> Result<Box<dyn Any>, InvokeError> {
        let Some(constructors) = &self.constructors else {
            return Err(InvokeError::NoConstructor(self.type_path()));
        };
        constructors.call_value(Receiver::Static, type_args, args)
    }

    /// Creates an instance through a constructor overload and unboxes it.
    pub fn construct_as<T: Any>(&self, args: ArgList) -> Result<T, InvokeError> {
        self.construct(None, args)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| InvokeError::NoConstructor(self.type_path()))
    }

    /// Invokes a member by name, see [`find_member`](Self::find_member).
    ///
    /// Instance members inherited from an embedded base are invoked on the
    /// base part of the receiver.
    pub fn invoke<'a>(
        &'static self,
        name: &str,
        this: Receiver<'a>,
        type_args: Option<&[TypeId]>,
        args: ArgList,
    ) -> Result<Output<'a>, InvokeError> {
        let member = self
            .find_member(name)
            .ok_or_else(|| InvokeError::NotFound(name.to_string()))?;
        let this = self.project(member.declaring(), this)?;
        member.invoke(this, type_args, args)
    }

    /// Projects a receiver of this type to its `target` base part.
    fn project<'a>(&'static self, target: Type, this: Receiver<'a>) -> Result<Receiver<'a>, InvokeError> {
        if target == self.ty || matches!(this, Receiver::Static) {
            return Ok(this);
        }
        let Some(base) = self.bases.iter().find(|base| base.info().is_derived_from(target.id())) else {
            return Err(self.not_a_base(target));
        };
        let receiver_type = || InvokeError::ReceiverType(self.type_path());
        let projected = match this {
            Receiver::Ref(this) if base.is_embedded() => {
                Receiver::Ref(base.upcast(this).ok_or_else(receiver_type)?)
            }
            Receiver::Mut(this) if base.is_embedded() => {
                Receiver::Mut(base.upcast_mut(this).ok_or_else(receiver_type)?)
            }
            Receiver::Owned(_) => {
                return Err(InvokeError::ReceiverMismatch {
                    expect: ReceiverKind::Ref,
                    actual: ReceiverKind::Owned,
                });
            }
            _ => return Err(self.not_a_base(target)),
        };
        base.info().project(target, projected)
    }

    #[inline]
    fn not_a_base(&self, target: Type) -> InvokeError {
        InvokeError::NotABase {
            base: target.path(),
            derived: self.type_path(),
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("ty", &self.ty)
            .field("category", &self.category)
            .field("generics", &self.generics)
            .field("bases", &self.bases)
            .field("members", &self.members)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
