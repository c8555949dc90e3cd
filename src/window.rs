use core::fmt;
use core::iter::Chain;
use core::ops::Index;

use crate::median::{Median, Sample, midpoint};
use crate::os_bag::{Iter, OSBag};
use crate::{Rank, WindowError};

/// The multiset of values inside a sliding window, split into two ordered
/// halves so the median is always at the boundary.
///
/// The low half holds the smaller values and the high half the larger ones.
/// After every operation:
///
/// - every value in the low half is `<=` every value in the high half;
/// - the low half holds as many values as the high half, or exactly one more.
///
/// Values equal to the boundary may sit in either half. [`insert`] and
/// [`remove`] are O(log k); [`median`] is O(1).
///
/// The window does not know its own horizon: the caller decides which value
/// leaves. [`SlidingMedian`](crate::SlidingMedian) drives it over a stream.
///
/// # Examples
///
/// ```
/// use wabi_window::{Median, MedianWindow};
///
/// let mut window = MedianWindow::new();
/// window.insert(5);
/// window.insert(1);
/// window.insert(3);
/// assert_eq!(window.median(), Ok(Median::Exact(3)));
///
/// window.remove(&5)?;
/// assert_eq!(window.median(), Ok(Median::Midpoint(2.0)));
/// # Ok::<(), wabi_window::WindowError>(())
/// ```
///
/// [`insert`]: MedianWindow::insert
/// [`remove`]: MedianWindow::remove
/// [`median`]: MedianWindow::median
pub struct MedianWindow<T> {
    low: OSBag<T>,
    high: OSBag<T>,
}

impl<T> MedianWindow<T> {
    /// Makes a new, empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            low: OSBag::new(),
            high: OSBag::new(),
        }
    }

    /// Makes a new, empty window sized for `size` values.
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        let half = size / 2 + 1;
        Self {
            low: OSBag::with_capacity(half),
            high: OSBag::with_capacity(half),
        }
    }

    /// Returns the number of values in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    /// Returns `true` if the window holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.low.clear();
        self.high.clear();
    }

    /// The smaller half of the window. Its largest value is the lower median.
    #[must_use]
    pub fn low(&self) -> &OSBag<T> {
        &self.low
    }

    /// The larger half of the window. Its smallest value is the upper median
    /// of an even-sized window.
    #[must_use]
    pub fn high(&self) -> &OSBag<T> {
        &self.high
    }

    /// Iterates over every value in the window in ascending order.
    ///
    /// ```
    /// use wabi_window::MedianWindow;
    ///
    /// let mut window = MedianWindow::new();
    /// for value in [4, -2, 9, 4] {
    ///     window.insert(value);
    /// }
    /// let values: Vec<_> = window.iter().copied().collect();
    /// assert_eq!(values, [-2, 4, 4, 9]);
    /// ```
    pub fn iter(&self) -> Chain<Iter<'_, T>, Iter<'_, T>> {
        self.low.iter().chain(self.high.iter())
    }
}

impl<T: Sample> MedianWindow<T> {
    /// Adds `value` to the window.
    ///
    /// Values no greater than the current lower median join the low half, the
    /// rest join the high half; the halves are then rebalanced.
    pub fn insert(&mut self, value: T) {
        if self.low.last().is_none_or(|max| value <= *max) {
            self.low.insert(value);
        } else {
            self.high.insert(value);
        }
        self.rebalance();
    }

    /// Removes one occurrence of `value` from the window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ValueNotFound`] if the window does not hold
    /// `value`. The window is left unchanged.
    pub fn remove(&mut self, value: &T) -> Result<(), WindowError> {
        if !self.low.remove(value) && !self.high.remove(value) {
            tracing::debug!(len = self.len(), "remove of a value the window does not hold");
            return Err(WindowError::ValueNotFound);
        }
        self.rebalance();
        Ok(())
    }

    /// Returns the median of the values in the window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::EmptyWindow`] if the window holds no values.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn median(&self) -> Result<Median<T>, WindowError> {
        let lower = self.low.last().ok_or(WindowError::EmptyWindow)?;
        if self.low.len() > self.high.len() {
            return Ok(Median::Exact(lower.clone()));
        }

        let upper = self.high.first().ok_or(WindowError::EmptyWindow)?;
        Ok(Median::Midpoint(midpoint(lower.to_f64(), upper.to_f64())))
    }

    /// Returns `true` if the window holds at least one occurrence of `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.low.contains(value) || self.high.contains(value)
    }

    /// Returns the value at zero-based position `rank` in the sorted window.
    ///
    /// ```
    /// use wabi_window::MedianWindow;
    ///
    /// let mut window = MedianWindow::new();
    /// for value in [30, 10, 20] {
    ///     window.insert(value);
    /// }
    /// assert_eq!(window.get_by_rank(0), Some(&10));
    /// assert_eq!(window.get_by_rank(2), Some(&30));
    /// assert_eq!(window.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        match rank.checked_sub(self.low.len()) {
            None => self.low.get_by_rank(rank),
            Some(rank) => self.high.get_by_rank(rank),
        }
    }

    /// Restores the size balance between the halves. A single insert or
    /// remove needs at most one move, but this runs to a fixed point.
    fn rebalance(&mut self) {
        while self.low.len() > self.high.len() + 1 {
            let Some(value) = self.low.pop_last() else {
                break;
            };
            tracing::trace!(low = self.low.len(), high = self.high.len(), "moving lower median to high half");
            self.high.insert(value);
        }
        while self.low.len() < self.high.len() {
            let Some(value) = self.high.pop_first() else {
                break;
            };
            tracing::trace!(low = self.low.len(), high = self.high.len(), "moving upper median to low half");
            self.low.insert(value);
        }
    }
}

impl<T> Default for MedianWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for MedianWindow<T> {
    fn clone(&self) -> Self {
        Self {
            low: self.low.clone(),
            high: self.high.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MedianWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedianWindow")
            .field("low", &self.low)
            .field("high", &self.high)
            .finish()
    }
}

/// Indexes into the sorted window by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<T: Sample> Index<Rank> for MedianWindow<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
