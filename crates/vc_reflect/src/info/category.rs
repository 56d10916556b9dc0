use bitflags::bitflags;

bitflags! {
    /// The kind of an entity described by reflection metadata.
    ///
    /// Every [`TypeInfo`](crate::info::TypeInfo) and
    /// [`MemberInfo`](crate::info::MemberInfo) has exactly one category.
    /// Combinations are used as filters and as the set of targets an
    /// [`Attribute`](crate::info::Attribute) may be attached to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_reflect::info::Category;
    /// let filter = Category::VARIABLE | Category::FUNCTION;
    ///
    /// assert!(filter.contains(Category::FUNCTION));
    /// assert!(!filter.contains(Category::TYPE));
    /// assert!(Category::MEMBERS.contains(filter));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Category: u8 {
        /// A concrete type.
        const TYPE = 1 << 0;
        /// A generic type, described before instantiation.
        const TYPE_TEMPLATE = 1 << 1;
        /// A field or a static value.
        const VARIABLE = 1 << 2;
        /// A set of function or method overloads.
        const FUNCTION = 1 << 3;

        /// Every category a member can have.
        const MEMBERS = Self::TYPE.bits() | Self::VARIABLE.bits() | Self::FUNCTION.bits();
    }
}

impl Category {
    /// Returns `true` if this is a single category rather than a combination.
    #[inline]
    pub const fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn members_excludes_templates() {
        assert!(!Category::MEMBERS.contains(Category::TYPE_TEMPLATE));
        assert_eq!(Category::all(), Category::MEMBERS | Category::TYPE_TEMPLATE);
        assert!(Category::FUNCTION.is_single());
        assert!(!Category::MEMBERS.is_single());
        assert!(!Category::empty().is_single());
    }
}
