/// Calls the target macro once per prefix of the given identifiers,
/// from the empty prefix up to the full list.
///
/// Each identifier is paired with its tuple index, so the target macro can
/// both name the type parameters and access tuple fields.
///
/// # Example
///
/// ```ignore
/// tuple_invoke!(my_macro, P0, P1, P2);
/// // eq to ↓
/// my_macro!();
/// my_macro!(0: P0);
/// my_macro!(0: P0, 1: P1);
/// my_macro!(0: P0, 1: P1, 2: P2);
/// ```
///
/// At most 16 identifiers are supported.
#[macro_export]
macro_rules! tuple_invoke {
    ($macro:ident $(, $name:ident)* $(,)?) => {
        $crate::tuple_invoke!(
            @step $macro []
            [$($name),*]
            [0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15]
        );
    };
    (@step $macro:ident [$($done_idx:tt : $done:ident),*] [] [$($_idx:tt)*]) => {
        $macro!($($done_idx : $done),*);
    };
    (
        @step $macro:ident [$($done_idx:tt : $done:ident),*]
        [$next:ident $(, $rest:ident)*]
        [$idx:tt $($more:tt)*]
    ) => {
        $macro!($($done_idx : $done),*);
        $crate::tuple_invoke!(
            @step $macro [$($done_idx : $done,)* $idx : $next]
            [$($rest),*]
            [$($more)*]
        );
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! impl_arity {
        ($($index:tt : $name:ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = 0 $(+ { let _ = $index; 1 })*;
            }
        };
    }

    tuple_invoke!(impl_arity, P0, P1, P2, P3);

    #[test]
    fn every_prefix_is_expanded() {
        assert_eq!(<()>::ARITY, 0);
        assert_eq!(<(u8,)>::ARITY, 1);
        assert_eq!(<(u8, u16, u32)>::ARITY, 3);
        assert_eq!(<(u8, u16, u32, u64)>::ARITY, 4);
    }
}
