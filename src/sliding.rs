use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::median::{Median, Sample};
use crate::{MedianWindow, WindowError};

/// Drives a [`MedianWindow`] over a stream with a fixed horizon of `size`
/// values.
///
/// Each [`push`](SlidingMedian::push) inserts the new value. Once `size`
/// values are inside, it reads the median and then evicts the oldest value,
/// so the next push completes the next window.
///
/// # Examples
///
/// ```
/// use wabi_window::{Median, SlidingMedian};
///
/// let mut sliding = SlidingMedian::new(2)?;
/// assert_eq!(sliding.push(1)?, None);
/// assert_eq!(sliding.push(4)?, Some(Median::Midpoint(2.5)));
/// assert_eq!(sliding.push(6)?, Some(Median::Midpoint(5.0)));
/// # Ok::<(), wabi_window::WindowError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SlidingMedian<T> {
    window: MedianWindow<T>,
    // Values inside the window, oldest first.
    pending: VecDeque<T>,
    size: usize,
}

impl<T: Sample> SlidingMedian<T> {
    /// Creates a driver for windows of `size` values.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ZeroWindow`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, WindowError> {
        if size == 0 {
            return Err(WindowError::ZeroWindow);
        }

        tracing::debug!(size, "sliding median window created");
        Ok(Self {
            window: MedianWindow::with_capacity(size),
            pending: VecDeque::with_capacity(size),
            size,
        })
    }

    /// Feeds the next value of the stream. Returns the median of the window
    /// this value completes, or `None` while fewer than `size` values have
    /// been seen.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowError`] from the underlying window. This only
    /// happens if its contents diverged from the values pushed here.
    pub fn push(&mut self, value: T) -> Result<Option<Median<T>>, WindowError> {
        self.window.insert(value.clone());
        self.pending.push_back(value);
        if self.pending.len() < self.size {
            return Ok(None);
        }

        let median = self.window.median()?;
        if let Some(oldest) = self.pending.pop_front() {
            self.window.remove(&oldest)?;
        }
        Ok(Some(median))
    }

    /// The number of values in each window.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.size
    }

    /// The number of values carried over into the next window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no values are carried over.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The window holding the carried-over values.
    #[must_use]
    pub fn window(&self) -> &MedianWindow<T> {
        &self.window
    }

    /// Forgets every value seen so far. The window size is kept.
    pub fn reset(&mut self) {
        self.window.clear();
        self.pending.clear();
    }
}

/// Computes the median of every window of `size` consecutive values, in
/// stream order.
///
/// A stream shorter than `size` yields no medians.
///
/// # Errors
///
/// Returns [`WindowError::ZeroWindow`] if `size` is zero.
///
/// # Examples
///
/// ```
/// use wabi_window::{Median, sliding_medians};
///
/// let medians = sliding_medians([1, 3, -1, -3, 5, 3, 6, 7], 3)?;
/// let exact: Vec<_> = medians.into_iter().filter_map(Median::exact).collect();
/// assert_eq!(exact, [1, -1, -1, 3, 5, 6]);
/// # Ok::<(), wabi_window::WindowError>(())
/// ```
pub fn sliding_medians<T, I>(values: I, size: usize) -> Result<Vec<Median<T>>, WindowError>
where
    T: Sample,
    I: IntoIterator<Item = T>,
{
    let mut sliding = SlidingMedian::new(size)?;
    let mut medians = Vec::new();
    for value in values {
        if let Some(median) = sliding.push(value)? {
            medians.push(median);
        }
    }
    Ok(medians)
}
