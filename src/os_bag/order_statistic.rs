use core::borrow::Borrow;
use core::ops::Index;

use super::OSBag;
use crate::Rank;

impl<T: Ord> OSBag<T> {
    /// Returns the value at position `rank` in sorted order, counting every
    /// occurrence.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
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
    /// let bag = OSBag::from([10, 20, 20, 30]);
    /// assert_eq!(bag.get_by_rank(1), Some(&20));
    /// assert_eq!(bag.get_by_rank(2), Some(&20));
    /// assert!(bag.get_by_rank(4).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the zero-based rank of the first occurrence of `value`, or
    /// `None` if the value is not present.
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
    /// let bag = OSBag::from([10, 10, 20]);
    ///
    /// assert_eq!(bag.rank_of(&10), Some(0));
    /// assert_eq!(bag.rank_of(&20), Some(2));
    /// assert_eq!(bag.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(value)
    }
}

/// Indexes into the bag by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use wabi_window::{OSBag, Rank};
///
/// let bag = OSBag::from([10, 20, 30]);
/// assert_eq!(bag[Rank(1)], 20);
/// ```
impl<T: Ord> Index<Rank> for OSBag<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
