use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::impls::{GenericTypePathCell, NonGenericTypeInfoCell, concat};
use crate::info::{Reflected, TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Primitives

macro_rules! impl_primitive {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline(always)]
                fn type_path() -> &'static str {
                    $name
                }

                #[inline(always)]
                fn type_name() -> &'static str {
                    $name
                }

                #[inline(always)]
                fn type_ident() -> &'static str {
                    $name
                }
            }

            impl Reflected for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::builder::<Self>().build())
                }
            }
        )*
    };
}

impl_primitive! {
    () => "()",
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
}

impl TypePath for str {
    #[inline(always)]
    fn type_path() -> &'static str {
        "str"
    }

    #[inline(always)]
    fn type_name() -> &'static str {
        "str"
    }

    #[inline(always)]
    fn type_ident() -> &'static str {
        "str"
    }
}

impl TypePath for String {
    #[inline(always)]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    #[inline(always)]
    fn type_name() -> &'static str {
        "String"
    }

    #[inline(always)]
    fn type_ident() -> &'static str {
        "String"
    }

    #[inline(always)]
    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Reflected for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::builder::<Self>().build())
    }
}

// -----------------------------------------------------------------------------
// Generic containers

macro_rules! impl_container_path {
    ($ty:ident, $module:literal, $($bound:tt)*) => {
        impl<T: TypePath $($bound)*> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($ty), "<", T::type_name(), ">"])
                })
            }

            #[inline(always)]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline(always)]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

impl_container_path!(Vec, "alloc::vec",);
impl_container_path!(Box, "alloc::boxed", + ?Sized);
impl_container_path!(Option, "core::option",);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{Category, Reflected, TypePath};
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn container_paths() {
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(<Option<Vec<String>>>::type_name(), "Option<Vec<String>>");
        assert_eq!(<Box<str>>::type_name(), "Box<str>");
        assert_eq!(<Vec<u8>>::type_ident(), "Vec");
        assert_eq!(<Option<u8>>::module_path(), Some("core::option"));
    }

    #[test]
    fn primitives_have_empty_infos() {
        let info = i32::type_info();
        assert_eq!(info.type_path(), "i32");
        assert_eq!(info.category(), Category::TYPE);
        assert!(info.members().is_empty());
        assert!(core::ptr::eq(info, i32::type_info()));
    }
}
