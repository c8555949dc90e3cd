/// A zero-based rank into the sorted order of a bag or window.
///
/// Duplicates occupy consecutive ranks, one per occurrence.
///
/// # Examples
///
/// ```
/// use wabi_window::{OSBag, Rank};
///
/// let bag = OSBag::from([30, 10, 20, 10]);
///
/// assert_eq!(bag[Rank(0)], 10);
/// assert_eq!(bag[Rank(1)], 10);
/// assert_eq!(bag[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
