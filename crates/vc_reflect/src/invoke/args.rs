use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::invoke::InvokeError;

// -----------------------------------------------------------------------------
// ArgList

/// Owned, type-erased arguments for a runtime call.
///
/// Arguments are matched against parameter types exactly, no conversions are
/// applied: pass `5_i64` to an `i64` parameter, not `5`.
///
/// # Examples
///
/// ```
/// # use vc_reflect::invoke::{ArgList, args};
/// let list = args![1_i32, String::from("two")];
/// assert_eq!(list.len(), 2);
///
/// let same = ArgList::new().with(1_i32).with(String::from("two"));
/// assert_eq!(list.type_ids(), same.type_ids());
/// ```
#[derive(Default)]
pub struct ArgList {
    values: Vec<Box<dyn Any>>,
    // for error messages
    names: Vec<&'static str>,
}

impl ArgList {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Appends an argument.
    #[inline]
    pub fn with<T: Any>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Appends an argument.
    #[inline]
    pub fn push<T: Any>(&mut self, value: T) {
        self.values.push(Box::new(value));
        self.names.push(type_name::<T>());
    }

    /// Appends an already boxed argument.
    ///
    /// The static type is unknown here, error messages show `_` for it.
    #[inline]
    pub fn push_boxed(&mut self, value: Box<dyn Any>) {
        self.values.push(value);
        self.names.push("_");
    }

    /// Returns the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the dynamic type of every argument, in order.
    pub fn type_ids(&self) -> Vec<TypeId> {
        self.values.iter().map(|arg| Any::type_id(&**arg)).collect()
    }

    /// A readable list of argument types, for error messages.
    pub(crate) fn describe(&self) -> String {
        self.names.join(", ")
    }

    /// Consumes the list, yielding typed arguments in order.
    #[inline]
    pub(crate) fn into_reader(self) -> ArgReader {
        ArgReader {
            expect: self.values.len(),
            index: 0,
            iter: self.values.into_iter(),
        }
    }
}

impl fmt::Debug for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgList").field(&self.names).finish()
    }
}

/// Builds an [`ArgList`] from a list of expressions.
///
/// ```
/// # use vc_reflect::invoke::args;
/// let empty = args![];
/// let two = args![1_u8, "literal"];
/// assert!(empty.is_empty());
/// assert_eq!(two.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        $crate::invoke::ArgList::new() $(.with($arg))*
    };
}

// -----------------------------------------------------------------------------
// ArgReader

/// Takes typed arguments out of a consumed [`ArgList`].
pub(crate) struct ArgReader {
    expect: usize,
    index: usize,
    iter: alloc::vec::IntoIter<Box<dyn Any>>,
}

impl ArgReader {
    /// Takes the next argument as a `T`.
    pub(crate) fn take<T: Any>(&mut self) -> Result<T, InvokeError> {
        let index = self.index;
        self.index += 1;
        let arg = self.iter.next().ok_or(InvokeError::ArgumentCount {
            expect: index + 1,
            actual: self.expect,
        })?;
        match arg.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(InvokeError::ArgumentType {
                index,
                expect: type_name::<T>(),
            }),
        }
    }

    /// Fails if arguments are left over.
    pub(crate) fn finish(self) -> Result<(), InvokeError> {
        if self.index == self.expect {
            Ok(())
        } else {
            Err(InvokeError::ArgumentCount {
                expect: self.index,
                actual: self.expect,
            })
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ArgList;
    use crate::invoke::InvokeError;
    use core::any::TypeId;

    #[test]
    fn reader_checks_types_and_count() {
        let mut reader = args![1_u8, 2_i64].into_reader();
        assert_eq!(reader.take::<u8>(), Ok(1));
        assert_eq!(
            reader.take::<i32>(),
            Err(InvokeError::ArgumentType {
                index: 1,
                expect: "i32"
            })
        );
        assert!(reader.finish().is_ok());

        let reader = args![1_u8].into_reader();
        assert!(reader.finish().is_err());
    }

    #[test]
    fn type_ids_are_dynamic() {
        let mut list = ArgList::new();
        list.push(3_u16);
        list.push_boxed(alloc::boxed::Box::new('x'));
        assert_eq!(list.type_ids(), [TypeId::of::<u16>(), TypeId::of::<char>()]);
        assert_eq!(list.describe(), "u16, _");
    }
}
