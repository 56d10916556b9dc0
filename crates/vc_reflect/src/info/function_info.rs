use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::invoke::{ArgList, InvokeError, Output, Overload, Receiver, ReceiverKind};

// -----------------------------------------------------------------------------
// FunctionInfo

/// The overload set of a function member.
///
/// Overloads are distinguished by receiver kind, type arguments and parameter
/// types. Two overloads that agree on all three cannot be told apart by a
/// caller and are rejected when the set is built.
///
/// # Resolution
///
/// [`resolve`](FunctionInfo::resolve) picks an overload for a call:
///
/// 1. Parameter types must match the argument types exactly.
/// 2. Without explicit type arguments, non-template overloads are preferred;
///    template instantiations are only considered if none fits.
///    With explicit type arguments only instantiations whose type arguments
///    start with them are considered.
/// 3. Among the remaining overloads the best receiver fit wins, see
///    [`ReceiverKind::rank`]. A tie is reported as ambiguous.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::FunctionInfo;
/// # use vc_reflect::invoke::{Overload, Receiver, args};
/// let describe = FunctionInfo::new([
///     Overload::function(|n: i32| format!("int {n}")),
///     Overload::function(|s: String| format!("text {s}")),
/// ]);
///
/// let out = describe.call(Receiver::Static, None, args![String::from("hi")]).unwrap();
/// assert_eq!(out.downcast::<String>().unwrap(), "text hi");
///
/// assert!(describe.call(Receiver::Static, None, args![1.5_f32]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct FunctionInfo {
    overloads: Arc<[Overload]>,
}

impl FunctionInfo {
    /// Creates an overload set.
    ///
    /// # Panics
    ///
    /// Panics if two overloads have the same signature.
    #[track_caller]
    pub fn new(overloads: impl IntoIterator<Item = Overload>) -> Self {
        match Self::try_new(overloads) {
            Ok(info) => info,
            Err(overload) => panic!("duplicate overload {overload:?}"),
        }
    }

    /// Creates an overload set, returning the first duplicate on failure.
    pub fn try_new(overloads: impl IntoIterator<Item = Overload>) -> Result<Self, Overload> {
        let mut list: Vec<Overload> = Vec::new();
        for overload in overloads {
            if list.iter().any(|o| o.same_signature(&overload)) {
                return Err(overload);
            }
            list.push(overload);
        }
        Ok(Self {
            overloads: list.into(),
        })
    }

    /// Returns a new set with the overloads of `other` appended.
    #[track_caller]
    pub fn merged(&self, other: &FunctionInfo) -> Self {
        Self::new(self.overloads.iter().chain(other.overloads.iter()).cloned())
    }

    /// The overloads, in declaration order.
    #[inline]
    pub fn overloads(&self) -> &[Overload] {
        &self.overloads
    }

    /// Returns `true` if any overload is a template instantiation.
    pub fn has_templates(&self) -> bool {
        self.overloads.iter().any(Overload::is_template)
    }

    /// Selects the overload for a call, see the type-level docs.
    pub fn resolve(
        &self,
        receiver: ReceiverKind,
        type_args: Option<&[TypeId]>,
        arg_types: &[TypeId],
    ) -> Result<&Overload, ResolveError> {
        let fits = |o: &&Overload| o.accepts(arg_types) && receiver.rank(o.receiver()).is_some();

        let candidates: Vec<&Overload> = match type_args {
            None => {
                let plain: Vec<_> = self
                    .overloads
                    .iter()
                    .filter(|o| !o.is_template())
                    .filter(fits)
                    .collect();
                if plain.is_empty() {
                    self.overloads
                        .iter()
                        .filter(|o| o.is_template())
                        .filter(fits)
                        .collect()
                } else {
                    plain
                }
            }
            Some(wanted) => self
                .overloads
                .iter()
                .filter(|o| o.type_args().is_some_and(|args| args.starts_with(wanted)))
                .filter(fits)
                .collect(),
        };

        let Some(best) = candidates.iter().filter_map(|o| receiver.rank(o.receiver())).min() else {
            return Err(ResolveError::NoMatch);
        };
        let mut winners = candidates
            .into_iter()
            .filter(|o| receiver.rank(o.receiver()) == Some(best));
        match (winners.next(), winners.count()) {
            (Some(winner), 0) => Ok(winner),
            (_, rest) => Err(ResolveError::Ambiguous(rest + 1)),
        }
    }

    /// Resolves and calls an overload.
    #[inline]
    pub fn call<'a>(
        &self,
        this: Receiver<'_>,
        type_args: Option<&[TypeId]>,
        args: ArgList,
    ) -> Result<Output<'a>, InvokeError> {
        self.call_value(this, type_args, args).map(Output::Value)
    }

    /// Same as [`call`](Self::call), returning the boxed value.
    pub fn call_value(
        &self,
        this: Receiver<'_>,
        type_args: Option<&[TypeId]>,
        args: ArgList,
    ) -> Result<Box<dyn Any>, InvokeError> {
        match self.resolve(this.kind(), type_args, &args.type_ids()) {
            Ok(overload) => overload.call_value(this, args),
            Err(ResolveError::Ambiguous(n)) => Err(InvokeError::Ambiguous(n)),
            Err(ResolveError::NoMatch) => Err(InvokeError::NoMatchingOverload(args.describe())),
        }
    }
}

/// Why [`FunctionInfo::resolve`] failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResolveError {
    /// No overload fits.
    NoMatch,
    /// This many overloads fit equally well.
    Ambiguous(usize),
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FunctionInfo, ResolveError};
    use crate::invoke::{InvokeError, Overload, Receiver, ReceiverKind, args};
    use core::any::TypeId;

    struct Counter(i32);

    fn counter_fns() -> FunctionInfo {
        FunctionInfo::new([
            Overload::method(|c: &Counter| c.0),
            Overload::method_mut(|c: &mut Counter| {
                c.0 += 1;
                c.0
            }),
            Overload::function(|| -1_i32),
        ])
    }

    #[test]
    fn exact_receiver_wins() {
        let fns = counter_fns();
        let mut counter = Counter(10);

        let out = fns.call(Receiver::Ref(&counter), None, args![]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), 10);

        let out = fns.call(Receiver::Mut(&mut counter), None, args![]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), 11);

        let out = fns.call(Receiver::Static, None, args![]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), -1);

        // owned lends `&mut` before `&`
        let out = fns.call(Receiver::owned(Counter(0)), None, args![]).unwrap();
        assert_eq!(out.downcast::<i32>().unwrap(), 1);
    }

    #[test]
    fn ties_are_ambiguous() {
        let fns = FunctionInfo::new([
            Overload::method(|c: &Counter| c.0),
            Overload::method(|c: &Counter| c.0 as i64).with_type_args::<(i64,)>(),
            Overload::method(|c: &Counter| c.0 as u64).with_type_args::<(u64,)>(),
        ]);
        let ids: [TypeId; 0] = [];

        // the plain overload hides the templates
        assert!(fns.resolve(ReceiverKind::Ref, None, &ids).is_ok());

        let picked = fns
            .resolve(ReceiverKind::Ref, Some(&[TypeId::of::<u64>()]), &ids)
            .unwrap();
        assert!(picked.ret().is::<u64>());

        assert_eq!(
            fns.resolve(ReceiverKind::Ref, Some(&[]), &ids).unwrap_err(),
            ResolveError::Ambiguous(2)
        );
        assert_eq!(
            fns.resolve(ReceiverKind::Static, None, &ids).unwrap_err(),
            ResolveError::NoMatch
        );
    }

    #[test]
    fn templates_need_type_args() {
        let fns = FunctionInfo::new([
            Overload::function(|x: u8| x).with_type_args::<(u8,)>(),
            Overload::function(|x: u8| x as u32).with_type_args::<(u32,)>(),
        ]);

        let err = fns.call(Receiver::Static, None, args![1_u8]).unwrap_err();
        assert_eq!(err, InvokeError::Ambiguous(2));

        let out = fns
            .call(Receiver::Static, Some(&[TypeId::of::<u32>()]), args![1_u8])
            .unwrap();
        assert_eq!(out.downcast::<u32>().unwrap(), 1);

        let single = FunctionInfo::new([Overload::function(|x: u8| x).with_type_args::<(u8,)>()]);
        let out = single.call(Receiver::Static, None, args![2_u8]).unwrap();
        assert_eq!(out.downcast::<u8>().unwrap(), 2);
    }

    #[test]
    #[should_panic(expected = "duplicate overload")]
    fn duplicates_are_rejected() {
        FunctionInfo::new([
            Overload::function(|x: i32| x),
            Overload::function(|y: i32| y * 2),
        ]);
    }
}
