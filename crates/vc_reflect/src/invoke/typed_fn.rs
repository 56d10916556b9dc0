use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use crate::invoke::{ArgList, InvokeError, Param};

// -----------------------------------------------------------------------------
// Typed function traits

/// A function without receiver, callable with erased arguments.
///
/// Implemented for every `Fn(P0, .., Pn) -> R` with up to 8 parameters, where
/// all parameters and the return type are `'static`.
pub trait StaticFn<Args>: Send + Sync + 'static {
    fn params() -> Vec<Param>;
    fn ret() -> Param;
    fn call_static(&self, args: ArgList) -> Result<Box<dyn Any>, InvokeError>;
}

/// A method taking `&S`, see [`StaticFn`].
pub trait RefFn<S, Args>: Send + Sync + 'static {
    fn params() -> Vec<Param>;
    fn ret() -> Param;
    fn call_ref(&self, this: &S, args: ArgList) -> Result<Box<dyn Any>, InvokeError>;
}

/// A method taking `&mut S`, see [`StaticFn`].
pub trait MutFn<S, Args>: Send + Sync + 'static {
    fn params() -> Vec<Param>;
    fn ret() -> Param;
    fn call_mut(&self, this: &mut S, args: ArgList) -> Result<Box<dyn Any>, InvokeError>;
}

/// A method taking `S` by value, see [`StaticFn`].
pub trait OwnedFn<S, Args>: Send + Sync + 'static {
    fn params() -> Vec<Param>;
    fn ret() -> Param;
    fn call_owned(&self, this: S, args: ArgList) -> Result<Box<dyn Any>, InvokeError>;
}

macro_rules! impl_typed_fn {
    ($($index:tt : $name:ident),*) => {
        impl<Func, Ret, $($name),*> StaticFn<($($name,)*)> for Func
        where
            Func: Fn($($name),*) -> Ret + Send + Sync + 'static,
            Ret: Any,
            $($name: Any,)*
        {
            #[inline]
            fn params() -> Vec<Param> {
                vec![$(Param::of::<$name>()),*]
            }

            #[inline]
            fn ret() -> Param {
                Param::of::<Ret>()
            }

            #[allow(non_snake_case, unused_mut, reason = "macro generated")]
            fn call_static(&self, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
                let mut reader = args.into_reader();
                $(let $name = reader.take::<$name>()?;)*
                reader.finish()?;
                Ok(Box::new((self)($($name),*)))
            }
        }

        impl<Func, Ret, Slf, $($name),*> RefFn<Slf, ($($name,)*)> for Func
        where
            Func: Fn(&Slf $(, $name)*) -> Ret + Send + Sync + 'static,
            Ret: Any,
            $($name: Any,)*
        {
            #[inline]
            fn params() -> Vec<Param> {
                vec![$(Param::of::<$name>()),*]
            }

            #[inline]
            fn ret() -> Param {
                Param::of::<Ret>()
            }

            #[allow(non_snake_case, unused_mut, reason = "macro generated")]
            fn call_ref(&self, this: &Slf, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
                let mut reader = args.into_reader();
                $(let $name = reader.take::<$name>()?;)*
                reader.finish()?;
                Ok(Box::new((self)(this $(, $name)*)))
            }
        }

        impl<Func, Ret, Slf, $($name),*> MutFn<Slf, ($($name,)*)> for Func
        where
            Func: Fn(&mut Slf $(, $name)*) -> Ret + Send + Sync + 'static,
            Ret: Any,
            $($name: Any,)*
        {
            #[inline]
            fn params() -> Vec<Param> {
                vec![$(Param::of::<$name>()),*]
            }

            #[inline]
            fn ret() -> Param {
                Param::of::<Ret>()
            }

            #[allow(non_snake_case, unused_mut, reason = "macro generated")]
            fn call_mut(&self, this: &mut Slf, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
                let mut reader = args.into_reader();
                $(let $name = reader.take::<$name>()?;)*
                reader.finish()?;
                Ok(Box::new((self)(this $(, $name)*)))
            }
        }

        impl<Func, Ret, Slf, $($name),*> OwnedFn<Slf, ($($name,)*)> for Func
        where
            Func: Fn(Slf $(, $name)*) -> Ret + Send + Sync + 'static,
            Ret: Any,
            $($name: Any,)*
        {
            #[inline]
            fn params() -> Vec<Param> {
                vec![$(Param::of::<$name>()),*]
            }

            #[inline]
            fn ret() -> Param {
                Param::of::<Ret>()
            }

            #[allow(non_snake_case, unused_mut, reason = "macro generated")]
            fn call_owned(&self, this: Slf, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
                let mut reader = args.into_reader();
                $(let $name = reader.take::<$name>()?;)*
                reader.finish()?;
                Ok(Box::new((self)(this $(, $name)*)))
            }
        }
    };
}

vc_utils::tuple_invoke!(impl_typed_fn, P0, P1, P2, P3, P4, P5, P6, P7);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::invoke::{InvokeError, Overload, Receiver, ReceiverKind, args};
    use alloc::string::String;

    struct Cell {
        value: i32,
    }

    #[test]
    fn static_function_checks_arguments() {
        let add = Overload::function(|a: i32, b: i32| a + b);
        assert_eq!(add.params().len(), 2);
        assert_eq!(add.receiver(), ReceiverKind::Static);

        let out = add.call(Receiver::Static, args![2, 3]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), 5);

        let err = add.call(Receiver::Static, args![2, 3_i64]).unwrap_err();
        assert!(matches!(err, InvokeError::NoMatchingOverload(_)));
    }

    #[test]
    fn receiver_kinds() {
        let get = Overload::method(|c: &Cell| c.value);
        let set = Overload::method_mut(|c: &mut Cell, v: i32| c.value = v);
        let into = Overload::method_owned(|c: Cell, suffix: String| alloc::format!("{}{suffix}", c.value));

        let mut cell = Cell { value: 1 };
        set.call(Receiver::Mut(&mut cell), args![7]).unwrap();
        assert_eq!(cell.value, 7);

        // a mutable receiver lends a shared one
        let out = get.call(Receiver::Mut(&mut cell), args![]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), 7);

        let err = set.call(Receiver::Ref(&cell), args![1]).unwrap_err();
        assert_eq!(
            err,
            InvokeError::ReceiverMismatch {
                expect: ReceiverKind::Mut,
                actual: ReceiverKind::Ref,
            }
        );

        let out = into
            .call(Receiver::owned(cell), args![String::from("!")])
            .unwrap();
        assert_eq!(out.downcast::<String>().unwrap(), "7!");
    }

    #[test]
    fn wrong_receiver_type() {
        let get = Overload::method(|c: &Cell| c.value);
        let err = get.call(Receiver::Ref(&5_u8), args![]).unwrap_err();
        assert!(matches!(err, InvokeError::ReceiverType(_)));
    }
}
