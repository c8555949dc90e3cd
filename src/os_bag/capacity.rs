use super::OSBag;
use crate::raw::RawOSBag;

impl<T> OSBag<T> {
    /// Creates an empty bag with room for at least `capacity` distinct values.
    ///
    /// Slots freed by removals are reused, so a bag that never holds more than
    /// `capacity` distinct values at once never reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_window::OSBag;
    ///
    /// let bag: OSBag<i32> = OSBag::with_capacity(16);
    /// assert!(bag.is_empty());
    /// assert!(bag.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSBag {
            raw: RawOSBag::with_capacity(capacity),
        }
    }

    /// Returns the number of distinct values the bag can hold without
    /// reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
