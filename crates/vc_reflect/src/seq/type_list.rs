use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

// -----------------------------------------------------------------------------
// TypeList

/// Visits the types of a [`TypeList`] one by one.
///
/// A visitor is the type-level equivalent of a closure: Rust closures cannot
/// be generic, so the per-type action is a generic method instead.
pub trait TypeVisitor {
    /// Called once per listed type, in order.
    fn visit<T: Any>(&mut self);
}

/// A compile-time list of types, implemented for tuples of up to 12 elements.
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// # use vc_reflect::seq::TypeList;
/// type Numbers = (u8, i32, f64);
///
/// assert_eq!(Numbers::LEN, 3);
/// assert!(Numbers::contains(TypeId::of::<i32>()));
/// assert_eq!(Numbers::type_names(), ["u8", "i32", "f64"]);
/// ```
pub trait TypeList: 'static {
    /// The number of listed types.
    const LEN: usize;

    /// Calls `visitor` once per type, in order.
    fn for_each<V: TypeVisitor>(visitor: &mut V);

    /// Returns the [`TypeId`] of every listed type.
    fn type_ids() -> Vec<TypeId> {
        struct Ids(Vec<TypeId>);
        impl TypeVisitor for Ids {
            fn visit<T: Any>(&mut self) {
                self.0.push(TypeId::of::<T>());
            }
        }

        let mut ids = Ids(Vec::with_capacity(Self::LEN));
        Self::for_each(&mut ids);
        ids.0
    }

    /// Returns the name of every listed type.
    fn type_names() -> Vec<&'static str> {
        struct Names(Vec<&'static str>);
        impl TypeVisitor for Names {
            fn visit<T: Any>(&mut self) {
                self.0.push(type_name::<T>());
            }
        }

        let mut names = Names(Vec::with_capacity(Self::LEN));
        Self::for_each(&mut names);
        names.0
    }

    /// Returns `true` if `type_id` is one of the listed types.
    fn contains(type_id: TypeId) -> bool {
        Self::type_ids().contains(&type_id)
    }

    /// Returns the ids of the listed types matching `pred`, in order.
    fn filter(mut pred: impl FnMut(TypeId) -> bool) -> Vec<TypeId> {
        let mut ids = Self::type_ids();
        ids.retain(|id| pred(*id));
        ids
    }
}

macro_rules! impl_type_list {
    ($($index:tt : $name:ident),*) => {
        impl<$($name: Any),*> TypeList for ($($name,)*) {
            const LEN: usize = 0 $(+ { let _ = $index; 1 })*;

            #[inline]
            #[allow(unused_variables, reason = "empty tuple")]
            fn for_each<V: TypeVisitor>(visitor: &mut V) {
                $(visitor.visit::<$name>();)*
            }
        }
    };
}

vc_utils::tuple_invoke!(impl_type_list, P0, P1, P2, P3, P4, P5, P6, P7, P8, P9, P10, P11);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{TypeList, TypeVisitor};
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::{Any, TypeId, type_name};

    #[test]
    fn empty_list() {
        assert_eq!(<()>::LEN, 0);
        assert!(<()>::type_ids().is_empty());
        assert!(!<()>::contains(TypeId::of::<()>()));
    }

    #[test]
    fn visitor_sees_every_type_in_order() {
        struct Collect(Vec<&'static str>);
        impl TypeVisitor for Collect {
            fn visit<T: Any>(&mut self) {
                self.0.push(type_name::<T>());
            }
        }

        let mut collect = Collect(Vec::new());
        <(bool, String, u8)>::for_each(&mut collect);
        assert_eq!(collect.0, ["bool", type_name::<String>(), "u8"]);
    }

    #[test]
    fn filter_keeps_order() {
        type L = (u8, u16, u32, u64);
        let wide = L::filter(|id| id != TypeId::of::<u8>() && id != TypeId::of::<u32>());
        assert_eq!(wide, [TypeId::of::<u16>(), TypeId::of::<u64>()]);
        assert_eq!(<(u8, u8)>::LEN, 2);
    }
}
