use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::info::Category;
use crate::seq::TypeList;

// -----------------------------------------------------------------------------
// Attribute

/// A user-defined value attached to a type or a member.
///
/// [`TARGETS`](Attribute::TARGETS) lists the categories the attribute may be
/// attached to. Attaching it anywhere else fails to compile when done through
/// the derive macros or [`Attributes::with`], and panics when done through the
/// runtime builders.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::{Attribute, Category};
/// #[derive(Debug)]
/// struct Range(f32, f32);
///
/// impl Attribute for Range {
///     const TARGETS: Category = Category::VARIABLE;
/// }
/// ```
pub trait Attribute: Any + Send + Sync + fmt::Debug {
    /// The categories this attribute can be attached to.
    const TARGETS: Category;

    /// Returns `true` if this attribute also counts as the marker type `marker`.
    ///
    /// Used by [`Attributes::filter_by_type`] to model attribute families:
    /// a `Range` attribute can declare itself a `Bounded` attribute.
    #[inline]
    fn is_a(&self, marker: TypeId) -> bool {
        let _ = marker;
        false
    }
}

/// Object-safe view of an [`Attribute`].
pub trait DynAttribute: Any + Send + Sync + fmt::Debug {
    /// See [`Attribute::TARGETS`].
    fn targets(&self) -> Category;

    /// See [`Attribute::is_a`].
    fn is_kind_of(&self, marker: TypeId) -> bool;

    /// The type name of the attribute, for diagnostics only.
    fn attribute_name(&self) -> &'static str;
}

impl<A: Attribute> DynAttribute for A {
    #[inline]
    fn targets(&self) -> Category {
        A::TARGETS
    }

    #[inline]
    fn is_kind_of(&self, marker: TypeId) -> bool {
        self.is_a(marker)
    }

    #[inline]
    fn attribute_name(&self) -> &'static str {
        type_name::<A>()
    }
}

impl dyn DynAttribute {
    /// Returns the attribute as `&A` if it is an `A`.
    #[inline]
    pub fn downcast_ref<A: Attribute>(&self) -> Option<&A> {
        (self as &dyn Any).downcast_ref::<A>()
    }

    /// Returns `true` if the attribute is an `A`.
    #[inline]
    pub fn is<A: Attribute>(&self) -> bool {
        (self as &dyn Any).is::<A>()
    }
}

// -----------------------------------------------------------------------------
// Attributes

/// An ordered collection of attributes.
///
/// Unlike a map, several attributes of the same type may be stored,
/// they keep their declaration order.
///
/// # Examples
///
/// ```
/// # use vc_reflect::info::{Attribute, Attributes, Category};
/// #[derive(Debug, PartialEq)]
/// struct Tooltip(&'static str);
///
/// impl Attribute for Tooltip {
///     const TARGETS: Category = Category::all();
/// }
///
/// let attrs = Attributes::new()
///     .with::<{ Category::VARIABLE.bits() }, _>(Tooltip("first"))
///     .with::<{ Category::VARIABLE.bits() }, _>(Tooltip("second"));
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.get::<Tooltip>(), Some(&Tooltip("first")));
/// assert!(attrs.is_valid_for(Category::TYPE));
/// ```
///
/// Attaching an attribute to a category it does not target fails to compile:
///
/// ```compile_fail
/// # use vc_reflect::info::{Attribute, Attributes, Category};
/// #[derive(Debug)]
/// struct OnlyTypes;
///
/// impl Attribute for OnlyTypes {
///     const TARGETS: Category = Category::TYPE;
/// }
///
/// let attrs = Attributes::new().with::<{ Category::FUNCTION.bits() }, _>(OnlyTypes);
/// ```
#[derive(Clone, Default)]
pub struct Attributes(Vec<Arc<dyn DynAttribute>>);

impl Attributes {
    /// Creates an empty collection.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an attribute, checking at compile time that `A` may be attached
    /// to the category whose bits are `TARGET`.
    ///
    /// `TARGET` is usually written `{ Category::X.bits() }`.
    #[inline]
    pub fn with<const TARGET: u8, A: Attribute>(mut self, attribute: A) -> Self {
        const {
            assert!(
                A::TARGETS.bits() & TARGET == TARGET && TARGET != 0,
                "attribute cannot be attached to this category",
            );
        }
        self.0.push(Arc::new(attribute));
        self
    }

    /// Appends an attribute, checking at runtime that `A` may be attached to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `A::TARGETS` does not contain `target`.
    #[track_caller]
    pub fn push_checked<A: Attribute>(&mut self, target: Category, attribute: A) {
        assert!(
            A::TARGETS.contains(target),
            "attribute `{}` cannot be attached to {target:?}",
            type_name::<A>(),
        );
        self.0.push(Arc::new(attribute));
    }

    /// Appends an attribute, without checks.
    #[inline]
    pub(crate) fn push_unchecked<A: Attribute>(&mut self, attribute: A) {
        self.0.push(Arc::new(attribute));
    }

    /// Appends all attributes of `other`, without checks.
    #[inline]
    pub(crate) fn extend(&mut self, other: &Attributes) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Returns the number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the attributes in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn DynAttribute> {
        self.0.iter().map(|attr| &**attr)
    }

    /// Returns the first attribute of type `A`.
    pub fn get<A: Attribute>(&self) -> Option<&A> {
        self.iter().find_map(|attr| attr.downcast_ref::<A>())
    }

    /// Returns every attribute of type `A`, in order.
    pub fn get_all<A: Attribute>(&self) -> impl Iterator<Item = &A> {
        self.iter().filter_map(|attr| attr.downcast_ref::<A>())
    }

    /// Returns `true` if an attribute of type `A` is present.
    #[inline]
    pub fn contains<A: Attribute>(&self) -> bool {
        self.iter().any(|attr| attr.is::<A>())
    }

    /// Returns the attributes whose type is in `L`, or that declare themselves
    /// one of the types in `L` through [`Attribute::is_a`].
    pub fn filter_by_type<L: TypeList>(&self) -> Vec<&dyn DynAttribute> {
        let wanted = L::type_ids();
        self.iter()
            .filter(|attr| {
                let id = (*attr as &dyn Any).type_id();
                wanted.iter().any(|w| *w == id || attr.is_kind_of(*w))
            })
            .collect()
    }

    /// Returns the attributes whose type is exactly one of the types in `L`.
    pub fn filter_by_type_exact<L: TypeList>(&self) -> Vec<&dyn DynAttribute> {
        let wanted = L::type_ids();
        self.iter()
            .filter(|attr| wanted.contains(&(*attr as &dyn Any).type_id()))
            .collect()
    }

    /// Returns `true` if every attribute may be attached to `category`.
    pub fn is_valid_for(&self, category: Category) -> bool {
        self.iter().all(|attr| attr.targets().contains(category))
    }

    /// Panics with the first attribute that may not be attached to `category`.
    #[track_caller]
    pub(crate) fn assert_valid_for(&self, category: Category) {
        if let Some(attr) = self.iter().find(|attr| !attr.targets().contains(category)) {
            panic!(
                "attribute `{}` cannot be attached to {category:?}",
                attr.attribute_name(),
            );
        }
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Attribute, Attributes};
    use crate::info::Category;
    use core::any::TypeId;

    #[derive(Debug)]
    struct Bounded;

    #[derive(Debug, PartialEq)]
    struct Range(i32, i32);

    #[derive(Debug)]
    struct Hidden;

    impl Attribute for Bounded {
        const TARGETS: Category = Category::VARIABLE;
    }

    impl Attribute for Range {
        const TARGETS: Category = Category::VARIABLE;

        fn is_a(&self, marker: TypeId) -> bool {
            marker == TypeId::of::<Bounded>()
        }
    }

    impl Attribute for Hidden {
        const TARGETS: Category = Category::MEMBERS;
    }

    const VAR: u8 = Category::VARIABLE.bits();

    #[test]
    fn filter_follows_is_a() {
        let attrs = Attributes::new()
            .with::<VAR, _>(Hidden)
            .with::<VAR, _>(Range(0, 10))
            .with::<VAR, _>(Bounded);

        let family = attrs.filter_by_type::<(Bounded,)>();
        assert_eq!(family.len(), 2);
        assert!(family[0].is::<Range>());
        assert!(family[1].is::<Bounded>());

        let exact = attrs.filter_by_type_exact::<(Bounded, Hidden)>();
        assert_eq!(exact.len(), 2);
        assert!(exact[0].is::<Hidden>());

        assert_eq!(attrs.get::<Range>(), Some(&Range(0, 10)));
        assert!(attrs.contains::<Hidden>());
    }

    #[test]
    fn validity_per_category() {
        let attrs = Attributes::new().with::<VAR, _>(Hidden).with::<VAR, _>(Bounded);
        assert!(attrs.is_valid_for(Category::VARIABLE));
        assert!(!attrs.is_valid_for(Category::FUNCTION));
        assert!(Attributes::new().is_valid_for(Category::TYPE_TEMPLATE));
    }

    #[test]
    #[should_panic(expected = "cannot be attached to")]
    fn runtime_check_rejects() {
        let mut attrs = Attributes::new();
        attrs.push_checked(Category::TYPE, Bounded);
    }
}
