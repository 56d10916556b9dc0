use core::any::Any;

// -----------------------------------------------------------------------------
// Apply

/// Unpacks a tuple into the arguments of a function.
///
/// # Examples
///
/// ```
/// # use vc_reflect::seq::Apply;
/// let sum = (1, 2u8, 3.5f32).apply(|a: i32, b: u8, c: f32| a as f32 + b as f32 + c);
/// assert_eq!(sum, 6.5);
/// ```
pub trait Apply<F> {
    /// The return type of `F`.
    type Output;

    /// Calls `f` with the tuple elements as arguments.
    fn apply(self, f: F) -> Self::Output;
}

/// Visits the values of a heterogeneous tuple one by one.
pub trait ValueVisitor {
    /// Called once per element, in order.
    fn visit<T: Any>(&mut self, value: &T);
}

/// Iteration over the values of a heterogeneous tuple.
///
/// ```
/// # use core::any::Any;
/// # use vc_reflect::seq::{TupleValues, ValueVisitor};
/// struct CountInts(usize);
/// impl ValueVisitor for CountInts {
///     fn visit<T: Any>(&mut self, value: &T) {
///         if (value as &dyn Any).is::<i32>() {
///             self.0 += 1;
///         }
///     }
/// }
///
/// let mut count = CountInts(0);
/// (1, "two", 3).for_each_value(&mut count);
/// assert_eq!(count.0, 2);
/// ```
pub trait TupleValues {
    /// Calls `visitor` once per element, in order.
    fn for_each_value<V: ValueVisitor>(&self, visitor: &mut V);
}

macro_rules! impl_apply {
    ($($index:tt : $name:ident),*) => {
        impl<Func, Ret, $($name),*> Apply<Func> for ($($name,)*)
        where
            Func: FnOnce($($name),*) -> Ret,
        {
            type Output = Ret;

            #[inline]
            fn apply(self, f: Func) -> Ret {
                f($(self.$index),*)
            }
        }

        impl<$($name: Any),*> TupleValues for ($($name,)*) {
            #[inline]
            #[allow(unused_variables, reason = "empty tuple")]
            fn for_each_value<V: ValueVisitor>(&self, visitor: &mut V) {
                $(visitor.visit::<$name>(&self.$index);)*
            }
        }
    };
}

vc_utils::tuple_invoke!(impl_apply, P0, P1, P2, P3, P4, P5, P6, P7, P8, P9, P10, P11);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Apply;
    use alloc::string::String;

    #[test]
    fn moves_elements_into_the_call() {
        let owned = (String::from("a"), String::from("b"));
        let joined = owned.apply(|a: String, b: String| a + &b);
        assert_eq!(joined, "ab");
        assert_eq!(().apply(|| 7), 7);
    }
}
