use alloc::vec::Vec;
use core::any::Any;
use std::sync::OnceLock;

use crate::info::{Attribute, Attributes, BaseInfo, Category, FunctionInfo, Generics};
use crate::info::{MemberInfo, MemberKind, NestedTypeInfo, Reflected, Type, TypeInfo};
use crate::info::VariableInfo;
use crate::invoke::Overload;

// -----------------------------------------------------------------------------
// TypeInfoBuilder

/// Builds a [`TypeInfo`], see [`TypeInfo::builder`].
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::TypePath;
/// use vc_reflect::impls::NonGenericTypeInfoCell;
/// use vc_reflect::info::{Reflected, TypeInfo, VariableInfo};
/// use vc_reflect::invoke::{Overload, Receiver, args};
///
/// #[derive(TypePath)]
/// struct Meters(f64);
///
/// impl Reflected for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::builder::<Self>()
///                 .variable("value", VariableInfo::field(|m: &Self| &m.0, |m| &mut m.0))
///                 .function("double", Overload::method(|m: &Self| m.0 * 2.0))
///                 .constructor(Overload::function(|v: f64| Meters(v)))
///                 .build()
///         })
///     }
/// }
///
/// let info = Meters::type_info();
/// let meters: Meters = info.construct_as(args![1.5_f64]).unwrap();
/// let out = info.invoke("double", Receiver::Ref(&meters), None, args![]).unwrap();
/// assert_eq!(out.downcast::<f64>().unwrap(), 3.0);
/// ```
#[must_use]
pub struct TypeInfoBuilder {
    ty: Type,
    category: Category,
    generics: Generics,
    bases: Vec<BaseInfo>,
    members: Vec<MemberInfo>,
    constructors: Vec<Overload>,
    attributes: Attributes,
    #[cfg(feature = "reflect_docs")]
    docs: Option<&'static str>,
}

impl TypeInfoBuilder {
    #[inline]
    pub(super) fn new(ty: Type) -> Self {
        Self {
            ty,
            category: Category::TYPE,
            generics: Generics::new(),
            bases: Vec::new(),
            members: Vec::new(),
            constructors: Vec::new(),
            attributes: Attributes::new(),
            #[cfg(feature = "reflect_docs")]
            docs: None,
        }
    }

    /// Records the generic parameters and marks the type as
    /// [`Category::TYPE_TEMPLATE`].
    #[inline]
    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self.category = Category::TYPE_TEMPLATE;
        self
    }

    /// Adds a base `B` that is not reachable from the built type.
    #[inline]
    pub fn base<B: Reflected>(mut self) -> Self {
        self.bases.push(BaseInfo::of::<B>());
        self
    }

    /// Adds a base `B` embedded in `S`, the built type.
    ///
    /// # Panics
    ///
    /// Panics if `S` is not the built type.
    #[track_caller]
    pub fn embedded_base<S: Any, B: Reflected>(
        mut self,
        get: fn(&S) -> &B,
        get_mut: fn(&mut S) -> &mut B,
    ) -> Self {
        assert!(
            self.ty.is::<S>(),
            "`{}` cannot be embedded into `{:?}`",
            B::type_path(),
            self.ty,
        );
        self.bases.push(BaseInfo::embedded(get, get_mut));
        self
    }

    /// Adds a member.
    ///
    /// A function member with the name of an existing function member is
    /// merged into its overload set.
    ///
    /// # Panics
    ///
    /// Panics if merging produces a duplicate overload.
    #[track_caller]
    pub fn member(mut self, member: MemberInfo) -> Self {
        if let MemberKind::Function(added) = member.kind() {
            let existing = self.members.iter_mut().find(|m| {
                m.name() == member.name() && matches!(m.kind(), MemberKind::Function(_))
            });
            if let Some(existing) = existing {
                if let MemberKind::Function(current) = existing.kind() {
                    let merged = current.merged(added);
                    let attributes = member.attributes().clone();
                    *existing = MemberInfo::with_declaring(
                        existing.name(),
                        existing.declaring(),
                        MemberKind::Function(merged),
                    )
                    .with_attributes(existing.attributes().clone())
                    .with_attributes(attributes);
                }
                return self;
            }
        }
        self.members.push(member);
        self
    }

    /// Adds several members, see [`member`](Self::member).
    #[track_caller]
    pub fn members(self, members: impl IntoIterator<Item = MemberInfo>) -> Self {
        members.into_iter().fold(self, Self::member)
    }

    /// Adds a variable member declared by the built type.
    #[inline]
    pub fn variable(self, name: &'static str, variable: VariableInfo) -> Self {
        let ty = self.ty;
        self.member(MemberInfo::with_declaring(name, ty, variable.into()))
    }

    /// Adds an overload to the function member `name` of the built type.
    #[track_caller]
    pub fn function(self, name: &'static str, overload: Overload) -> Self {
        let ty = self.ty;
        let function = FunctionInfo::new([overload]);
        self.member(MemberInfo::with_declaring(name, ty, function.into()))
    }

    /// Adds a nested type member.
    #[inline]
    pub fn nested(self, name: &'static str, nested: NestedTypeInfo) -> Self {
        let ty = self.ty;
        self.member(MemberInfo::with_declaring(name, ty, nested.into()))
    }

    /// Adds a constructor overload.
    #[inline]
    pub fn constructor(mut self, overload: Overload) -> Self {
        self.constructors.push(overload);
        self
    }

    /// Adds several constructor overloads.
    #[inline]
    pub fn constructors(mut self, overloads: impl IntoIterator<Item = Overload>) -> Self {
        self.constructors.extend(overloads);
        self
    }

    /// Appends an attribute, checked in [`build`](Self::build).
    #[inline]
    pub fn attribute<A: Attribute>(mut self, attribute: A) -> Self {
        self.attributes.push_unchecked(attribute);
        self
    }

    /// Appends a list of attributes, checked in [`build`](Self::build).
    #[inline]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(&attributes);
        self
    }

    #[cfg(feature = "reflect_docs")]
    #[inline]
    pub fn with_docs(mut self, docs: Option<&'static str>) -> Self {
        self.docs = docs;
        self
    }

    /// Finishes the descriptor.
    ///
    /// # Panics
    ///
    /// - An attribute cannot be attached to the type's category.
    /// - Two constructors have the same signature.
    /// - With the `debug` feature and debug assertions, a constructor is not
    ///   a static function returning the built type.
    #[track_caller]
    pub fn build(self) -> TypeInfo {
        self.attributes.assert_valid_for(self.category);

        #[cfg(all(debug_assertions, feature = "debug"))]
        for overload in &self.constructors {
            assert!(
                overload.ret().type_id() == self.ty.id()
                    && overload.receiver() == crate::invoke::ReceiverKind::Static,
                "constructor of `{:?}` must be static and return it, found {overload:?}",
                self.ty,
            );
        }

        log::trace!("built type info of `{:?}`", self.ty);

        TypeInfo {
            ty: self.ty,
            category: self.category,
            generics: self.generics,
            bases: self.bases.into_boxed_slice(),
            members: self.members.into(),
            constructors: (!self.constructors.is_empty())
                .then(|| FunctionInfo::new(self.constructors)),
            attributes: self.attributes,
            all_members: OnceLock::new(),
            #[cfg(feature = "reflect_docs")]
            docs: self.docs,
        }
    }
}
