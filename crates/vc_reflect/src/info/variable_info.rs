use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::invoke::{InvokeError, Output, Param, Receiver, ReceiverKind};
use crate::seq::TypeList;

// -----------------------------------------------------------------------------
// ErasedField

/// Projects an erased owner to one of its fields.
pub(crate) trait ErasedField: Send + Sync + 'static {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;
    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
    fn owner_name(&self) -> &'static str;
}

pub(crate) struct TypedField<S, F> {
    pub get: fn(&S) -> &F,
    pub get_mut: fn(&mut S) -> &mut F,
}

impl<S: Any, F: Any> ErasedField for TypedField<S, F> {
    #[inline]
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        owner.downcast_ref::<S>().map(|s| (self.get)(s) as &dyn Any)
    }

    #[inline]
    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        owner.downcast_mut::<S>().map(|s| (self.get_mut)(s) as &mut dyn Any)
    }

    #[inline]
    fn owner_name(&self) -> &'static str {
        type_name::<S>()
    }
}

// -----------------------------------------------------------------------------
// VariableInfo

#[derive(Clone)]
enum Storage {
    Static {
        value: &'static (dyn Any + Send + Sync),
        ty: Param,
    },
    Field {
        access: Arc<dyn ErasedField>,
        ty: Param,
    },
    Template(Arc<[(Box<[TypeId]>, Storage)]>),
}

/// A variable member: a field of the declaring type or a static value.
///
/// A generic static, e.g. one `const` per numeric type, is described as a
/// template with one entry per instantiation.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::VariableInfo;
/// # use vc_reflect::invoke::Receiver;
/// struct Point {
///     x: f32,
/// }
///
/// let x = VariableInfo::field(|p: &Point| &p.x, |p| &mut p.x);
/// let mut point = Point { x: 1.0 };
///
/// let mut out = x.get(Receiver::Mut(&mut point), None).unwrap();
/// *out.downcast_mut::<f32>().unwrap() = 2.5;
/// assert_eq!(point.x, 2.5);
///
/// static LIMIT: u32 = 16;
/// let limit = VariableInfo::of_static(&LIMIT);
/// let out = limit.get(Receiver::Static, None).unwrap();
/// assert_eq!(out.downcast_ref::<u32>(), Some(&16));
/// ```
#[derive(Clone)]
pub struct VariableInfo {
    storage: Storage,
}

impl VariableInfo {
    /// A static value.
    #[inline]
    pub fn of_static<V: Any + Send + Sync>(value: &'static V) -> Self {
        Self {
            storage: Storage::Static {
                value,
                ty: Param::of::<V>(),
            },
        }
    }

    /// A field of `S`, reached through the given projections.
    #[inline]
    pub fn field<S: Any, F: Any>(get: fn(&S) -> &F, get_mut: fn(&mut S) -> &mut F) -> Self {
        Self {
            storage: Storage::Field {
                access: Arc::new(TypedField { get, get_mut }),
                ty: Param::of::<F>(),
            },
        }
    }

    /// An uninstantiated template, see [`instantiate`](Self::instantiate).
    #[inline]
    pub fn template() -> Self {
        Self {
            storage: Storage::Template(Arc::new([])),
        }
    }

    /// Adds the instantiation of a template for the type arguments `L`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a template, or `variable` is one.
    #[track_caller]
    pub fn instantiate<L: TypeList>(self, variable: VariableInfo) -> Self {
        let Storage::Template(list) = self.storage else {
            panic!("only a template variable can be instantiated");
        };
        assert!(
            !matches!(variable.storage, Storage::Template(_)),
            "an instantiation cannot be a template itself",
        );
        let mut list: Vec<_> = list.iter().cloned().collect();
        list.push((L::type_ids().into(), variable.storage));
        Self {
            storage: Storage::Template(list.into()),
        }
    }

    /// Returns `true` for an uninstantiated template.
    #[inline]
    pub fn is_template(&self) -> bool {
        matches!(self.storage, Storage::Template(_))
    }

    /// Returns `true` for a static value.
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.storage, Storage::Static { .. })
    }

    /// The value type, `None` for a template.
    pub fn value_type(&self) -> Option<Param> {
        match &self.storage {
            Storage::Static { ty, .. } | Storage::Field { ty, .. } => Some(*ty),
            Storage::Template(_) => None,
        }
    }

    /// Borrows the variable.
    ///
    /// Static values ignore the receiver. Fields need a [`Receiver::Ref`] or
    /// [`Receiver::Mut`] of the declaring type and produce the same kind of
    /// borrow. Templates need the type arguments of one of their instantiations.
    pub fn get<'a>(
        &self,
        this: Receiver<'a>,
        type_args: Option<&[TypeId]>,
    ) -> Result<Output<'a>, InvokeError> {
        let storage = match (&self.storage, type_args) {
            (Storage::Template(_), None) => return Err(InvokeError::MissingTypeArgs),
            (Storage::Template(list), Some(args)) => list
                .iter()
                .find(|(ids, _)| **ids == *args)
                .map(|(_, storage)| storage)
                .ok_or(InvokeError::UnknownInstantiation)?,
            (storage, None) => storage,
            (storage, Some(args)) if args.is_empty() => storage,
            (_, Some(_)) => return Err(InvokeError::UnknownInstantiation),
        };

        match storage {
            Storage::Static { value, .. } => Ok(Output::Ref(*value as &dyn Any)),
            Storage::Field { access, .. } => {
                let owner = || InvokeError::ReceiverType(access.owner_name());
                match this {
                    Receiver::Ref(this) => access.get(this).map(Output::Ref).ok_or_else(owner),
                    Receiver::Mut(this) => access.get_mut(this).map(Output::Mut).ok_or_else(owner),
                    other => Err(InvokeError::ReceiverMismatch {
                        expect: ReceiverKind::Ref,
                        actual: other.kind(),
                    }),
                }
            }
            Storage::Template(_) => Err(InvokeError::UnknownInstantiation),
        }
    }
}

impl fmt::Debug for VariableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Static { ty, .. } => write!(f, "VariableInfo::Static({ty:?})"),
            Storage::Field { ty, .. } => write!(f, "VariableInfo::Field({ty:?})"),
            Storage::Template(list) => write!(f, "VariableInfo::Template({})", list.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::VariableInfo;
    use crate::invoke::{InvokeError, Receiver};
    use core::any::TypeId;

    struct Limits;

    impl Limits {
        const SMALL: u8 = 8;
        const LARGE: u64 = 1 << 40;
    }

    static SMALL: u8 = Limits::SMALL;
    static LARGE: u64 = Limits::LARGE;

    #[test]
    fn template_needs_type_args() {
        let max = VariableInfo::template()
            .instantiate::<(u8,)>(VariableInfo::of_static(&SMALL))
            .instantiate::<(u64,)>(VariableInfo::of_static(&LARGE));

        assert!(max.is_template());
        assert!(max.value_type().is_none());
        assert_eq!(max.get(Receiver::Static, None).unwrap_err(), InvokeError::MissingTypeArgs);

        let ids = [TypeId::of::<u64>()];
        let out = max.get(Receiver::Static, Some(&ids)).unwrap();
        assert_eq!(out.downcast_ref::<u64>(), Some(&(1 << 40)));

        let ids = [TypeId::of::<u16>()];
        assert_eq!(
            max.get(Receiver::Static, Some(&ids)).unwrap_err(),
            InvokeError::UnknownInstantiation
        );
    }

    #[test]
    fn field_needs_borrowed_owner() {
        let first = VariableInfo::field(|t: &(i32, bool)| &t.0, |t| &mut t.0);
        let tuple = (3, true);

        let out = first.get(Receiver::Ref(&tuple), None).unwrap();
        assert_eq!(out.downcast_ref::<i32>(), Some(&3));
        assert!(first.get(Receiver::Ref(&1_u8), None).is_err());
        assert!(first.get(Receiver::owned((1, false)), None).is_err());
        assert!(first.get(Receiver::Static, None).is_err());
    }
}
