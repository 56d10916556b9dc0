//! See following macros:
//!
//! - [`Reflected`]
//! - [`TypePath`]
//! - [`reflect_methods`]
//! - [`prototype`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, ItemImpl, ItemTrait, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Type Metadata Derivation
///
/// `#[derive(Reflected)]` implements `TypePath` and `Reflected`. Do not derive
/// `TypePath` next to it.
///
/// Named and tuple struct fields become variable members, in declaration
/// order. Enums and unit structs only carry type level information.
/// Lifetime parameters are not supported.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Reflected)]
/// #[reflect(type_path = "zoo::animals::Dog")]  // custom path, generics are appended
/// #[reflect(base = Animal)]                    // a base without storage in `Self`
/// #[reflect(nested(Leg = LegInfo))]           // a nested type member named `Leg`
/// #[reflect(methods)]                          // members from `#[reflect_methods]`
/// #[reflect(@Serializable)]                    // an attribute value
/// struct Dog { /* ... */ }
/// ```
///
/// `base` and `nested` types must implement `Reflected` themselves.
/// With `methods`, the type must also have a `#[reflect_methods]` block,
/// its constructors are registered too.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Reflected)]
/// struct Dog {
///     #[reflect(base)]          // an embedded base, accessed through this field
///     animal: Animal,
///     #[reflect(name = "years")]
///     age: u32,
///     #[reflect(@Range(0..4))]
///     legs: u8,
///     #[reflect(ignore)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Attribute Values
///
/// `@Expr` attaches `Expr` to the type or member. The value's `Attribute`
/// implementation decides where it may appear, mismatches are rejected at
/// compile time.
///
/// ## Documentation Reflection
///
/// Enable the `reflect_docs` feature to include documentation in type information.
///
/// By default, the macro collects `#[doc = "..."]` attributes (including `/// ...` comments).
/// `#[reflect(doc = false)]` disables collection, one or more
/// `#[reflect(doc = "...")]` replace the collected text.
///
/// This attribute is a no-op when the `reflect_docs` feature is disabled.
#[proc_macro_derive(Reflected, attributes(reflect))]
pub fn derive_reflected(input: TokenStream) -> TokenStream {
    use crate::derive_data::ReflectInput;

    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_input = match ReflectInput::from_derive_input(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_path_impl = impls::impl_type_path(&reflect_input.meta);
    let reflected_impl = impls::impl_reflected(&reflect_input);

    quote! {
        #type_path_impl
        #reflected_impl
    }
    .into()
}

/// # Type Path Derivation
///
/// Implements only `TypePath`. Accepts `#[reflect(type_path = "...")]`,
/// other type attributes are parsed and ignored.
///
/// ```rust, ignore
/// #[derive(TypePath)]
/// #[reflect(type_path = "geometry::Vec2")]
/// struct Vec2<T>(T, T);
///
/// assert_eq!(Vec2::<f32>::type_path(), "geometry::Vec2<f32>");
/// ```
#[proc_macro_derive(TypePath, attributes(reflect))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, TypeAttributes, TypeParser};

    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let type_attributes = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_parser = TypeParser::new(&ast.ident, type_attributes.type_path.clone(), &ast.generics);
    if let Err(err) = type_parser.check_lifetimes() {
        return err.into_compile_error().into();
    }

    let meta = ReflectMeta::new(type_attributes, type_parser);
    impls::impl_type_path(&meta).into()
}

/// # Method Reflection
///
/// Applied to an inherent `impl` block, implements `ReflectMethods` with one
/// function member per method name. Methods taking `&self`, `&mut self`,
/// `self` or no receiver are supported.
///
/// ```rust, ignore
/// #[reflect_methods]
/// impl Dog {
///     #[reflect(constructor)]
///     fn new(name: String) -> Self { /* ... */ }
///
///     fn bark(&self) -> String { /* ... */ }
///
///     #[reflect(name = "bark")]     // another overload of `bark`
///     fn bark_times(&self, times: u32) -> String { /* ... */ }
///
///     #[reflect(instantiate(u8), instantiate(String))]
///     fn fetch<T: Default>(&self) -> T { /* ... */ }
///
///     #[reflect(@Deprecated)]
///     fn sleep(&mut self) { /* ... */ }
///
///     #[reflect(skip)]
///     fn internal(&self, buf: &mut [u8]) { /* ... */ }
/// }
/// ```
///
/// Generic methods need at least one `instantiate(..)`, each becomes a
/// template overload. Parameters and return values must be owned:
/// references, `impl Trait`, `async` and `unsafe` methods are rejected
/// and can be excluded with `skip`.
///
/// Two overloads of one name with the same signature are a compile error.
#[proc_macro_attribute]
pub fn reflect_methods(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemImpl);
    impls::impl_reflect_methods(args.into(), item).into()
}

/// # Prototype Traits
///
/// Makes `dyn Trait` usable as the prototype of a `Dyn<dyn Trait, C>`:
///
/// - implements `Prototype` for `dyn Trait`,
/// - implements `ImplementedBy<T>` for every `T: Trait + Send + Sync + 'static`,
/// - implements `Trait` for `Dyn<dyn Trait, C>`, dispatching through the vtable.
///
/// ```rust, ignore
/// #[prototype]
/// trait Animal {
///     fn name(&self) -> &str;
///     fn feed(&mut self, grams: u32);
///     fn into_sound(self) -> String;
/// }
/// ```
///
/// The trait cannot be generic, have supertraits or contain anything but
/// methods. Every method takes `self`, `&self` or `&mut self`, has no
/// generic parameters and does not mention `Self` in its parameters or
/// return type. By-value methods get a `where Self: Sized` bound.
///
/// Each method is a slot, identified by its name and function pointer type.
/// Converting a `Dyn` between prototypes matches slots this way.
#[proc_macro_attribute]
pub fn prototype(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemTrait);
    impls::impl_prototype(args.into(), item).into()
}
