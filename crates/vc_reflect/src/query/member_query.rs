use core::borrow::Borrow;

use crate::info::{Attribute, Category, MemberInfo};
use crate::seq::{Seq, TypeList};

// -----------------------------------------------------------------------------
// MemberQuery

/// Queries over an ordered sequence of members.
///
/// Every filter keeps the original order and returns a new sequence.
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::{Reflected, reflect_methods};
/// use vc_reflect::info::{Category, Reflected};
/// use vc_reflect::query::MemberQuery;
///
/// #[derive(Reflected)]
/// #[reflect(methods)]
/// struct Account {
///     owner: String,
///     balance: i64,
/// }
///
/// #[reflect_methods]
/// impl Account {
///     fn deposit(&mut self, amount: i64) {
///         self.balance += amount;
///     }
/// }
///
/// let members = Account::type_info().members();
/// let variables = members.filter_by_category(Category::VARIABLE);
/// assert_eq!(variables.len(), 2);
///
/// let deposit = members.get_by_name("deposit").unwrap();
/// assert_eq!(deposit.category(), Category::FUNCTION);
/// assert!(members.get_by_name("withdraw").is_none());
/// ```
pub trait MemberQuery {
    /// The element type of the sequence.
    type Item;

    /// Returns the first member matching `pred`.
    fn find_if(&self, pred: impl FnMut(&MemberInfo) -> bool) -> Option<&Self::Item>;

    /// Returns the members whose category is contained in `categories`.
    fn filter_by_category(&self, categories: Category) -> Self;

    /// Returns the first member named `name`.
    fn get_by_name(&self, name: &str) -> Option<&Self::Item>;

    /// Returns the members carrying an attribute of type `A`.
    fn filter_by_attribute<A: Attribute>(&self) -> Self;

    /// Returns the members carrying an attribute of any type in `L`, or one
    /// declaring itself such a type through [`Attribute::is_a`].
    fn filter_by_attributes<L: TypeList>(&self) -> Self;

    /// Returns the members matching `pred`.
    fn filter_members(&self, pred: impl FnMut(&MemberInfo) -> bool) -> Self;
}

impl<M: Borrow<MemberInfo> + Clone> MemberQuery for Seq<M> {
    type Item = M;

    #[inline]
    fn find_if(&self, mut pred: impl FnMut(&MemberInfo) -> bool) -> Option<&M> {
        self.find(|m| pred(m.borrow()))
    }

    #[inline]
    fn filter_by_category(&self, categories: Category) -> Self {
        self.filter_members(|m| categories.contains(m.category()))
    }

    #[inline]
    fn get_by_name(&self, name: &str) -> Option<&M> {
        self.find_if(|m| m.name() == name)
    }

    #[inline]
    fn filter_by_attribute<A: Attribute>(&self) -> Self {
        self.filter_members(|m| m.attributes().contains::<A>())
    }

    #[inline]
    fn filter_by_attributes<L: TypeList>(&self) -> Self {
        self.filter_members(|m| !m.attributes().filter_by_type::<L>().is_empty())
    }

    #[inline]
    fn filter_members(&self, mut pred: impl FnMut(&MemberInfo) -> bool) -> Self {
        self.filter(|m| pred(m.borrow()))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::MemberQuery;
    use crate::info::{Attribute, Category, FunctionInfo, MemberInfo, NestedTypeInfo, VariableInfo};
    use crate::invoke::Overload;
    use crate::seq::Seq;

    #[derive(Debug)]
    struct Exported;

    impl Attribute for Exported {
        const TARGETS: Category = Category::MEMBERS;
    }

    struct Shape {
        sides: u32,
    }

    impl crate::info::TypePath for Shape {
        fn type_path() -> &'static str {
            "tests::Shape"
        }
        fn type_name() -> &'static str {
            "Shape"
        }
        fn type_ident() -> &'static str {
            "Shape"
        }
    }

    fn members() -> Seq<MemberInfo> {
        Seq::from_iter([
            MemberInfo::new::<Shape>("sides", VariableInfo::field(|s: &Shape| &s.sides, |s| &mut s.sides))
                .with_attribute(Exported),
            MemberInfo::new::<Shape>("Unit", NestedTypeInfo::of::<u8>()),
            MemberInfo::new::<Shape>("area", FunctionInfo::new([Overload::function(|| 0.0_f32)])),
            MemberInfo::new::<Shape>("sides", FunctionInfo::new([Overload::method(|s: &Shape| s.sides)]))
                .with_attribute(Exported),
        ])
    }

    #[test]
    fn categories_partition_members() {
        let all = members();
        let parts = [Category::TYPE, Category::VARIABLE, Category::FUNCTION]
            .map(|c| all.filter_by_category(c).len());
        assert_eq!(parts, [1, 1, 2]);
        assert_eq!(parts.iter().sum::<usize>(), all.len());
        assert_eq!(all.filter_by_category(Category::MEMBERS).len(), all.len());
        assert!(all.filter_by_category(Category::TYPE_TEMPLATE).is_empty());
    }

    #[test]
    fn first_match_wins() {
        let all = members();
        let sides = all.get_by_name("sides").unwrap();
        assert_eq!(sides.category(), Category::VARIABLE);

        let sides_fn = all.find_if(|m| m.name() == "sides" && m.category() == Category::FUNCTION);
        assert!(sides_fn.unwrap().as_function().is_ok());
    }

    #[test]
    fn attribute_filter_keeps_order() {
        let all = members();
        let exported = all.filter_by_attribute::<Exported>();
        let names: alloc::vec::Vec<_> = exported.iter().map(|m| (m.name(), m.category())).collect();
        assert_eq!(
            names,
            [("sides", Category::VARIABLE), ("sides", Category::FUNCTION)]
        );
        assert_eq!(all.filter_by_attributes::<(Exported, u8)>().len(), 2);

        // references to members support the same queries
        let borrowed: Seq<&MemberInfo> = all.iter().collect();
        assert_eq!(borrowed.filter_by_attribute::<Exported>().len(), 2);
    }
}
