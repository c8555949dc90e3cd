//! An ordered multiset with order-statistic queries.

use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{self, RawOSBag};

mod capacity;
mod order_statistic;

/// An ordered bag (multiset) based on a weight-balanced tree.
///
/// Unlike a set, a bag keeps every occurrence of a value: inserting `2` three
/// times and removing it once leaves two occurrences behind. Occurrences of the
/// same value share a single tree node, so memory grows with the number of
/// *distinct* values.
///
/// Besides insertion and single-occurrence removal in O(log n), the bag answers
/// [`first`](OSBag::first) and [`last`](OSBag::last) in O(1) and order-statistic
/// queries ([`get_by_rank`](OSBag::get_by_rank), [`rank_of`](OSBag::rank_of)) in
/// O(log n).
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value, as determined by the [`Ord`] trait,
/// changes while it is in the bag.
///
/// # Examples
///
/// ```
/// use wabi_window::OSBag;
///
/// let mut bag = OSBag::new();
/// bag.insert(3);
/// bag.insert(1);
/// bag.insert(3);
///
/// assert_eq!(bag.len(), 3);
/// assert_eq!(bag.count(&3), 2);
/// assert_eq!(bag.first(), Some(&1));
/// assert_eq!(bag.last(), Some(&3));
///
/// assert!(bag.remove(&3));
/// assert_eq!(bag.count(&3), 1);
///
/// let sorted: Vec<_> = bag.iter().copied().collect();
/// assert_eq!(sorted, [1, 3]);
/// ```
pub struct OSBag<T> {
    raw: RawOSBag<T>,
}

/// An ascending iterator over the occurrences of an `OSBag`.
///
/// This `struct` is created by the [`iter`] method on [`OSBag`].
///
/// # Examples
///
/// ```
/// use wabi_window::OSBag;
///
/// let bag = OSBag::from([2, 1, 2]);
/// let mut iter = bag.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OSBag::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: raw::Iter<'a, T>,
}

impl<T> OSBag<T> {
    /// Makes a new, empty `OSBag`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag: OSBag<i32> = OSBag::new();
    /// assert!(bag.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OSBag { raw: RawOSBag::new() }
    }

    /// Returns the number of occurrences in the bag, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([1, 1, 2]);
    /// assert_eq!(bag.len(), 3);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of distinct values in the bag.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([1, 1, 2]);
    /// assert_eq!(bag.distinct_len(), 2);
    /// ```
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.raw.distinct_len()
    }

    /// Returns `true` if the bag contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the bag, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::from([1, 2]);
    /// bag.clear();
    /// assert!(bag.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the smallest value in the bag, if any.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::new();
    /// assert_eq!(bag.first(), None);
    /// bag.insert(2);
    /// bag.insert(1);
    /// assert_eq!(bag.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns a reference to the largest value in the bag, if any.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([1, 3, 2]);
    /// assert_eq!(bag.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Gets an iterator that visits every occurrence in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([3, 1, 3]);
    /// let values: Vec<_> = bag.iter().copied().collect();
    /// assert_eq!(values, [1, 3, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.raw.iter() }
    }
}

impl<T: Ord> OSBag<T> {
    /// Adds one occurrence of `value` to the bag.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::new();
    /// bag.insert(7);
    /// bag.insert(7);
    /// assert_eq!(bag.count(&7), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        self.raw.insert(value);
    }

    /// Removes one occurrence of `value`. Returns whether an occurrence was
    /// present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::from([5, 5]);
    /// assert!(bag.remove(&5));
    /// assert!(bag.remove(&5));
    /// assert!(!bag.remove(&5));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Removes every occurrence of `value` and returns how many there were.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::from([5, 1, 5, 5]);
    /// assert_eq!(bag.remove_all(&5), 3);
    /// assert_eq!(bag.remove_all(&5), 0);
    /// assert_eq!(bag.len(), 1);
    /// ```
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_all(value)
    }

    /// Returns `true` if the bag holds at least one occurrence of `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count(value) > 0
    }

    /// Returns the number of occurrences of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([4, 4, 9]);
    /// assert_eq!(bag.count(&4), 2);
    /// assert_eq!(bag.count(&8), 0);
    /// ```
    #[must_use]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count(value)
    }
}

impl<T: Clone + Ord> OSBag<T> {
    /// Removes one occurrence of the smallest value and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::from([2, 1, 1]);
    /// assert_eq!(bag.pop_first(), Some(1));
    /// assert_eq!(bag.pop_first(), Some(1));
    /// assert_eq!(bag.pop_first(), Some(2));
    /// assert_eq!(bag.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.pop_first()
    }

    /// Removes one occurrence of the largest value and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let mut bag = OSBag::from([2, 1, 2]);
    /// assert_eq!(bag.pop_last(), Some(2));
    /// assert_eq!(bag.last(), Some(&2));
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.pop_last()
    }
}

impl<T> Default for OSBag<T> {
    /// Creates an empty `OSBag`.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OSBag<T> {
    fn clone(&self) -> Self {
        OSBag { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for OSBag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OSBag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OSBag<T> {}

impl<T: Ord> FromIterator<T> for OSBag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = OSBag::new();
        bag.extend(iter);
        bag
    }
}

impl<T: Ord> Extend<T> for OSBag<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for OSBag<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSBag<T> {
    /// Converts a `[T; N]` into an `OSBag<T>`, keeping duplicates.
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag = OSBag::from([1, 2, 2]);
    /// assert_eq!(bag.len(), 3);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a OSBag<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
