use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::slice;

// -----------------------------------------------------------------------------
// Seq

/// An immutable, ordered sequence.
///
/// Cloning a `Seq` is cheap, the elements are shared. Every operation that
/// "changes" a sequence returns a new one and keeps the original intact.
///
/// # Examples
///
/// ```
/// # use vc_reflect::seq::Seq;
/// let seq: Seq<i32> = Seq::from_iter([1, 2, 3, 4]);
/// let even = seq.filter(|x| x % 2 == 0);
///
/// assert_eq!(even.as_slice(), &[2, 4]);
/// assert_eq!(seq.len(), 4);
/// assert_eq!(seq.find(|x| *x > 1), Some(&2));
/// ```
pub struct Seq<T>(Arc<[T]>);

impl<T> Seq<T> {
    /// Creates an empty sequence.
    #[inline]
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns the first element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    /// Views the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Iterates the elements in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Returns the first element matching `pred`.
    #[inline]
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.0.iter().find(|item| pred(item))
    }

    /// Returns the position of the first element matching `pred`.
    #[inline]
    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.0.iter().position(pred)
    }

    /// Calls `f` for every element, in order.
    #[inline]
    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.0.iter().for_each(f);
    }

    /// Maps each element into a new sequence.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Seq<U> {
        Seq(self.0.iter().map(f).collect())
    }

    /// Passes all elements to `f` at once, as a slice.
    ///
    /// For statically known element lists use [`Apply`](crate::seq::Apply)
    /// on a tuple instead.
    #[inline]
    pub fn apply<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.0)
    }
}

impl<T: Clone> Seq<T> {
    /// Returns the elements matching `pred`, preserving their order.
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Self {
        Self(self.0.iter().filter(|item| pred(item)).cloned().collect())
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self(self.0.iter().chain(other.0.iter()).cloned().collect())
    }
}

impl<T: Clone> Seq<Seq<T>> {
    /// Concatenates all inner sequences, in order.
    ///
    /// ```
    /// # use vc_reflect::seq::Seq;
    /// let nested = Seq::from_iter([Seq::from_iter([1, 2]), Seq::new(), Seq::from_iter([3])]);
    /// assert_eq!(nested.flatten().as_slice(), &[1, 2, 3]);
    /// ```
    pub fn flatten(&self) -> Seq<T> {
        Seq(self.0.iter().flat_map(|inner| inner.iter().cloned()).collect())
    }
}

impl<T> Clone for Seq<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Seq<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Seq<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for Seq<T> {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self(Arc::from(value))
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

impl<T: Eq> Eq for Seq<T> {}

impl<T: fmt::Debug> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Seq;
        #[test]
    fn operations_keep_the_original() {
        let seq = Seq::from_iter(["a", "bb", "ccc"]);
        let long = seq.filter(|s| s.len() > 1);
        let joined = long.concat(&seq);

        assert_eq!(seq.as_slice(), &["a", "bb", "ccc"]);
        assert_eq!(long.as_slice(), &["bb", "ccc"]);
        assert_eq!(joined.as_slice(), &["bb", "ccc", "a", "bb", "ccc"]);
        assert_eq!(joined.map(|s| s.len()).as_slice(), &[2, 3, 1, 2, 3]);
    }

    #[test]
    fn find_returns_first_match() {
        let seq = Seq::from_iter([(1, 'a'), (2, 'b'), (2, 'c')]);
        assert_eq!(seq.find(|(n, _)| *n == 2), Some(&(2, 'b')));
        assert_eq!(seq.position(|(n, _)| *n == 2), Some(1));
        assert_eq!(seq.find(|(n, _)| *n == 3), None);
    }

    #[test]
    fn empty_sequences() {
        let empty: Seq<u8> = Seq::new();
        assert!(empty.is_empty());
        assert!(empty.filter(|_| true).is_empty());
        assert_eq!(empty.concat(&Seq::from_iter([1])).len(), 1);
        assert_eq!(Seq::<Seq<u8>>::new().flatten(), Seq::new());
    }

    #[test]
    fn apply_and_for_each() {
        let seq = Seq::from_iter([1, 2, 3]);
        let mut sum = 0;
        seq.for_each(|x| sum += x);
        assert_eq!(sum, 6);
        assert_eq!(seq.apply(|all| all.iter().product::<i32>()), 6);
    }
}
