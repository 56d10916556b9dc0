use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::info::{Reflected, TypeInfo};
use crate::invoke::InvokeError;
use crate::seq::TypeList;

// -----------------------------------------------------------------------------
// NestedTypeInfo

#[derive(Clone)]
enum Resolver {
    Plain(fn() -> &'static TypeInfo),
    Template(Arc<[(Box<[TypeId]>, fn() -> &'static TypeInfo)]>),
}

/// A type member: a type declared in the scope of another type.
///
/// Rust has no nested types, so these are registered explicitly, e.g. with
/// `#[reflect(nested(Iter = PointIter))]`. A generic nested type is a template
/// with one entry per registered instantiation.
///
/// The descriptor is resolved lazily, so two types may name each other.
#[derive(Clone)]
pub struct NestedTypeInfo {
    resolver: Resolver,
}

impl NestedTypeInfo {
    /// The nested type `T`.
    #[inline]
    pub fn of<T: Reflected>() -> Self {
        Self {
            resolver: Resolver::Plain(T::type_info),
        }
    }

    /// An uninstantiated template, see [`instantiate`](Self::instantiate).
    #[inline]
    pub fn template() -> Self {
        Self {
            resolver: Resolver::Template(Arc::new([])),
        }
    }

    /// Adds `T` as the instantiation of a template for the type arguments `L`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a template.
    #[track_caller]
    pub fn instantiate<L: TypeList, T: Reflected>(self) -> Self {
        let Resolver::Template(list) = self.resolver else {
            panic!("only a template type can be instantiated");
        };
        let mut list: Vec<_> = list.iter().cloned().collect();
        list.push((L::type_ids().into(), T::type_info as fn() -> &'static TypeInfo));
        Self {
            resolver: Resolver::Template(list.into()),
        }
    }

    /// Returns `true` for a template.
    #[inline]
    pub fn is_template(&self) -> bool {
        matches!(self.resolver, Resolver::Template(_))
    }

    /// Returns the descriptor of a plain nested type.
    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        match &self.resolver {
            Resolver::Plain(info) => Some(info()),
            Resolver::Template(_) => None,
        }
    }

    /// Returns the descriptors of all instantiations of a template, in order.
    pub fn instantiations(&self) -> Vec<&'static TypeInfo> {
        match &self.resolver {
            Resolver::Plain(_) => Vec::new(),
            Resolver::Template(list) => list.iter().map(|(_, info)| info()).collect(),
        }
    }

    /// Resolves the descriptor for the given type arguments.
    pub fn resolve(&self, type_args: Option<&[TypeId]>) -> Result<&'static TypeInfo, InvokeError> {
        match (&self.resolver, type_args) {
            (Resolver::Plain(info), None) => Ok(info()),
            (Resolver::Plain(info), Some(args)) if args.is_empty() => Ok(info()),
            (Resolver::Plain(_), Some(_)) => Err(InvokeError::UnknownInstantiation),
            (Resolver::Template(_), None) => Err(InvokeError::MissingTypeArgs),
            (Resolver::Template(list), Some(args)) => list
                .iter()
                .find(|(ids, _)| **ids == *args)
                .map(|(_, info)| info())
                .ok_or(InvokeError::UnknownInstantiation),
        }
    }
}

impl fmt::Debug for NestedTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolver {
            Resolver::Plain(info) => write!(f, "NestedTypeInfo({:?})", info().ty()),
            Resolver::Template(list) => write!(f, "NestedTypeInfo::Template({})", list.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::NestedTypeInfo;
    use crate::info::Reflected;
    use crate::invoke::InvokeError;
    use alloc::string::String;
    use core::any::TypeId;

    #[test]
    fn plain_ignores_empty_arguments() {
        let nested = NestedTypeInfo::of::<String>();
        assert!(!nested.is_template());
        assert!(core::ptr::eq(nested.resolve(None).unwrap(), String::type_info()));
        assert!(nested.resolve(Some(&[])).is_ok());
        assert_eq!(
            nested.resolve(Some(&[TypeId::of::<u8>()])).unwrap_err(),
            InvokeError::UnknownInstantiation,
        );
    }

    #[test]
    fn template_selects_by_arguments() {
        let nested = NestedTypeInfo::template()
            .instantiate::<(u8,), u8>()
            .instantiate::<(u16,), String>();

        assert!(nested.type_info().is_none());
        assert_eq!(nested.instantiations().len(), 2);
        assert_eq!(nested.resolve(None).unwrap_err(), InvokeError::MissingTypeArgs);

        let info = nested.resolve(Some(&[TypeId::of::<u16>()])).unwrap();
        assert_eq!(info.type_name(), "String");
        assert_eq!(
            nested.resolve(Some(&[TypeId::of::<u32>()])).unwrap_err(),
            InvokeError::UnknownInstantiation,
        );
    }
}
