//! Runtime invocation of members with erased receivers and arguments.
//!
//! The entry point is [`invoke`], which dispatches on the member category:
//!
//! | Category   | Receiver                       | Result                         |
//! |------------|--------------------------------|--------------------------------|
//! | `TYPE`     | ignored                        | a new instance, [`Output::Value`] |
//! | `VARIABLE` | `Ref`/`Mut` of the declaring type, ignored for statics | a borrow, [`Output::Ref`]/[`Output::Mut`] |
//! | `FUNCTION` | depends on the chosen overload | the return value, [`Output::Value`] |

// -----------------------------------------------------------------------------
// Modules

mod args;
mod error;
mod object_builder;
mod overload;
mod receiver;
mod typed_fn;

// -----------------------------------------------------------------------------
// Exports

pub use crate::args;
pub use args::ArgList;
pub use error::InvokeError;
pub use object_builder::ObjectBuilder;
pub use overload::{ErasedCall, Overload, Param};
pub use receiver::{Output, Receiver, ReceiverKind};
pub use typed_fn::{MutFn, OwnedFn, RefFn, StaticFn};

use core::any::TypeId;

use crate::info::{MemberInfo, MemberKind};

// -----------------------------------------------------------------------------
// invoke

/// Invokes a member.
///
/// - A nested type is constructed: its constructor overloads are resolved
///   against `args`, `type_args` select the instantiation of a template.
/// - A variable is borrowed from the receiver, or from static storage.
///   `args` must be empty.
/// - A function resolves one overload against the receiver, `type_args` and
///   `args`, then calls it.
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::{Reflected, reflect_methods};
/// use vc_reflect::info::Reflected;
/// use vc_reflect::invoke::{Receiver, args, invoke};
///
/// #[derive(Reflected)]
/// #[reflect(methods)]
/// struct Tank {
///     level: u32,
/// }
///
/// #[reflect_methods]
/// impl Tank {
///     fn fill(&mut self, amount: u32) -> u32 {
///         self.level += amount;
///         self.level
///     }
/// }
///
/// let info = Tank::type_info();
/// let mut tank = Tank { level: 1 };
///
/// let fill = info.member("fill").unwrap();
/// let out = invoke(fill, Receiver::Mut(&mut tank), None, args![4_u32]).unwrap();
/// assert_eq!(out.downcast::<u32>().unwrap(), 5);
///
/// let level = info.member("level").unwrap();
/// let out = invoke(level, Receiver::Ref(&tank), None, args![]).unwrap();
/// assert_eq!(out.downcast_ref::<u32>(), Some(&5));
/// ```
pub fn invoke<'a>(
    member: &MemberInfo,
    this: Receiver<'a>,
    type_args: Option<&[TypeId]>,
    args: ArgList,
) -> Result<Output<'a>, InvokeError> {
    match member.kind() {
        MemberKind::Type(nested) => nested
            .resolve(type_args)?
            .construct(None, args)
            .map(Output::Value),
        MemberKind::Variable(variable) => {
            if !args.is_empty() {
                return Err(InvokeError::ArgumentCount {
                    expect: 0,
                    actual: args.len(),
                });
            }
            variable.get(this, type_args)
        }
        MemberKind::Function(function) => function.call(this, type_args, args),
    }
}
