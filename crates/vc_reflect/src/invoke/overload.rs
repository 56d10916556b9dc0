use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use crate::invoke::{ArgList, InvokeError, Output, Receiver, ReceiverKind};
use crate::invoke::{MutFn, OwnedFn, RefFn, StaticFn};
use crate::seq::TypeList;

// -----------------------------------------------------------------------------
// Param

/// The type of a parameter or return value.
///
/// Compared by [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct Param {
    type_id: TypeId,
    type_name: &'static str,
}

impl Param {
    /// The parameter type `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The compiler-provided type name, for diagnostics only.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for Param {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Param {}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

// -----------------------------------------------------------------------------
// ErasedCall

/// A callable with erased receiver, arguments and return value.
///
/// Implemented by the adapters behind [`Overload::function`] and friends.
/// The arguments have already been checked against the overload's parameters
/// when this is called, the receiver has not.
pub trait ErasedCall: Send + Sync + 'static {
    /// Performs the call.
    fn call(&self, this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError>;
}

// -----------------------------------------------------------------------------
// Overload

/// One concrete signature of a function member.
///
/// # Examples
///
/// ```
/// # use vc_reflect::invoke::{Overload, Receiver, ReceiverKind, args};
/// struct Dog {
///     legs: u8,
/// }
///
/// let legs = Overload::method(|dog: &Dog| dog.legs);
/// assert_eq!(legs.receiver(), ReceiverKind::Ref);
/// assert!(legs.params().is_empty());
/// assert!(legs.ret().is::<u8>());
///
/// let dog = Dog { legs: 4 };
/// let out = legs.call(Receiver::Ref(&dog), args![]).unwrap();
/// assert_eq!(out.downcast::<u8>().unwrap(), 4);
/// ```
#[derive(Clone)]
pub struct Overload {
    receiver: ReceiverKind,
    // the receiver type for methods
    owner: Option<Param>,
    params: Arc<[Param]>,
    ret: Param,
    type_args: Option<Arc<[TypeId]>>,
    type_arg_names: Arc<[&'static str]>,
    call: Arc<dyn ErasedCall>,
}

impl Overload {
    fn new(
        receiver: ReceiverKind,
        owner: Option<Param>,
        params: Vec<Param>,
        ret: Param,
        call: Arc<dyn ErasedCall>,
    ) -> Self {
        Self {
            receiver,
            owner,
            params: params.into(),
            ret,
            type_args: None,
            type_arg_names: Arc::new([]),
            call,
        }
    }

    /// Wraps a function without receiver, e.g. `fn(i32, i32) -> i32`.
    pub fn function<Args: 'static, F: StaticFn<Args>>(func: F) -> Self {
        Self::new(
            ReceiverKind::Static,
            None,
            F::params(),
            F::ret(),
            Arc::new(StaticAdapter(func, PhantomData)),
        )
    }

    /// Wraps a method taking `&S`.
    pub fn method<S: Any, Args: 'static, F: RefFn<S, Args>>(func: F) -> Self {
        Self::new(
            ReceiverKind::Ref,
            Some(Param::of::<S>()),
            F::params(),
            F::ret(),
            Arc::new(RefAdapter(func, PhantomData)),
        )
    }

    /// Wraps a method taking `&mut S`.
    pub fn method_mut<S: Any, Args: 'static, F: MutFn<S, Args>>(func: F) -> Self {
        Self::new(
            ReceiverKind::Mut,
            Some(Param::of::<S>()),
            F::params(),
            F::ret(),
            Arc::new(MutAdapter(func, PhantomData)),
        )
    }

    /// Wraps a method taking `S` by value.
    pub fn method_owned<S: Any, Args: 'static, F: OwnedFn<S, Args>>(func: F) -> Self {
        Self::new(
            ReceiverKind::Owned,
            Some(Param::of::<S>()),
            F::params(),
            F::ret(),
            Arc::new(OwnedAdapter(func, PhantomData)),
        )
    }

    /// Marks this overload as an instantiation of a generic function with the
    /// type arguments `L`.
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_reflect::invoke::Overload;
    /// let parse = Overload::function(|s: String| s.parse::<u8>().ok())
    ///     .with_type_args::<(u8,)>();
    ///
    /// assert!(parse.is_template());
    /// assert_eq!(parse.type_args(), Some(&[TypeId::of::<u8>()][..]));
    /// ```
    pub fn with_type_args<L: TypeList>(mut self) -> Self {
        self.type_args = Some(L::type_ids().into());
        self.type_arg_names = L::type_names().into();
        self
    }

    /// How the receiver is taken.
    #[inline(always)]
    pub const fn receiver(&self) -> ReceiverKind {
        self.receiver
    }

    /// The receiver type for methods, `None` for static functions.
    #[inline(always)]
    pub const fn owner(&self) -> Option<Param> {
        self.owner
    }

    /// The parameter types, receiver excluded.
    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The return type.
    #[inline(always)]
    pub const fn ret(&self) -> Param {
        self.ret
    }

    /// The type arguments of a generic function instantiation.
    #[inline]
    pub fn type_args(&self) -> Option<&[TypeId]> {
        self.type_args.as_deref()
    }

    /// The names of [`type_args`](Self::type_args), for diagnostics only.
    #[inline]
    pub fn type_arg_names(&self) -> &[&'static str] {
        &self.type_arg_names
    }

    /// Returns `true` if this is an instantiation of a generic function.
    #[inline]
    pub fn is_template(&self) -> bool {
        self.type_args.is_some()
    }

    /// Returns `true` if both overloads could not be told apart by a caller.
    pub fn same_signature(&self, other: &Overload) -> bool {
        self.receiver == other.receiver && self.type_args == other.type_args && self.params == other.params
    }

    /// Returns `true` if the argument types match the parameters exactly.
    pub fn accepts(&self, arg_types: &[TypeId]) -> bool {
        self.params.len() == arg_types.len()
            && self.params.iter().zip(arg_types).all(|(p, a)| p.type_id == *a)
    }

    /// Calls this overload directly, checking the arguments first.
    #[inline]
    pub fn call<'a>(&self, this: Receiver<'_>, args: ArgList) -> Result<Output<'a>, InvokeError> {
        self.call_value(this, args).map(Output::Value)
    }

    /// Same as [`call`](Self::call), returning the boxed value.
    pub fn call_value(&self, this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
        if !self.accepts(&args.type_ids()) {
            return Err(InvokeError::NoMatchingOverload(args.describe()));
        }
        if this.kind().rank(self.receiver).is_none() {
            return Err(InvokeError::ReceiverMismatch {
                expect: self.receiver,
                actual: this.kind(),
            });
        }
        self.call.call(this, args)
    }
}

impl fmt::Debug for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overload")
            .field("receiver", &self.receiver)
            .field("params", &self.params)
            .field("ret", &self.ret)
            .field("type_args", &self.type_arg_names)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Adapters

struct StaticAdapter<F, Args>(F, PhantomData<fn(Args)>);

struct RefAdapter<F, S, Args>(F, PhantomData<fn(&S, Args)>);

struct MutAdapter<F, S, Args>(F, PhantomData<fn(&mut S, Args)>);

struct OwnedAdapter<F, S, Args>(F, PhantomData<fn(S, Args)>);

impl<Args: 'static, F: StaticFn<Args>> ErasedCall for StaticAdapter<F, Args> {
    #[inline]
    fn call(&self, _this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
        self.0.call_static(args)
    }
}

impl<S: Any, Args: 'static, F: RefFn<S, Args>> ErasedCall for RefAdapter<F, S, Args> {
    #[inline]
    fn call(&self, this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
        this.with_ref(|this: &S| self.0.call_ref(this, args))?
    }
}

impl<S: Any, Args: 'static, F: MutFn<S, Args>> ErasedCall for MutAdapter<F, S, Args> {
    #[inline]
    fn call(&self, this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
        this.with_mut(|this: &mut S| self.0.call_mut(this, args))?
    }
}

impl<S: Any, Args: 'static, F: OwnedFn<S, Args>> ErasedCall for OwnedAdapter<F, S, Args> {
    #[inline]
    fn call(&self, this: Receiver<'_>, args: ArgList) -> Result<Box<dyn Any>, InvokeError> {
        self.0.call_owned(this.into_owned::<S>()?, args)
    }
}
