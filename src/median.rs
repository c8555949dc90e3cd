use core::cmp::Ordering;
use core::fmt;
use core::num::ParseFloatError;
use core::str::FromStr;

/// A totally ordered numeric value that a [`MedianWindow`](crate::MedianWindow)
/// can track.
///
/// `to_f64` is only used to average the two middle values of an even-sized
/// window; odd-sized windows report the stored value itself.
pub trait Sample: Ord + Clone {
    /// Widens the value into the floating-point domain used for averaging.
    fn to_f64(&self) -> f64;
}

macro_rules! impl_sample_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sample for $ty {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_sample_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// An `f64` ordered by [`f64::total_cmp`], so floating-point streams can be
/// tracked by an ordered bag.
///
/// `-0.0` sorts before `+0.0` and NaNs sort to the ends according to their
/// sign bit.
///
/// # Examples
///
/// ```
/// use wabi_window::TotalF64;
///
/// let mut values = [TotalF64(2.5), TotalF64(-1.0), TotalF64(0.0)];
/// values.sort();
/// assert_eq!(values, [TotalF64(-1.0), TotalF64(0.0), TotalF64(2.5)]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Sample for TotalF64 {
    #[inline]
    fn to_f64(&self) -> f64 {
        self.0
    }
}

impl From<f64> for TotalF64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl FromStr for TotalF64 {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for TotalF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The median of a window.
///
/// Odd-sized windows have a single middle value, reported exactly as stored.
/// Even-sized windows report the mean of the two middle values as an `f64`.
///
/// `Display` prints whole numbers without a fractional part and halves with
/// their exact fraction:
///
/// ```
/// use wabi_window::Median;
///
/// assert_eq!(Median::Exact(-1).to_string(), "-1");
/// assert_eq!(Median::<i64>::Midpoint(4.0).to_string(), "4");
/// assert_eq!(Median::<i64>::Midpoint(2.5).to_string(), "2.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Median<T> {
    /// The middle value of an odd-sized window.
    Exact(T),
    /// The mean of the two middle values of an even-sized window.
    Midpoint(f64),
}

impl<T> Median<T> {
    /// Returns the stored middle value if the window was odd-sized.
    #[must_use]
    pub fn exact(self) -> Option<T> {
        match self {
            Median::Exact(value) => Some(value),
            Median::Midpoint(_) => None,
        }
    }

    /// Returns `true` if this median is a stored value rather than a mean.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, Median::Exact(_))
    }
}

impl<T: Sample> Median<T> {
    /// Returns the median in the floating-point domain.
    ///
    /// ```
    /// use wabi_window::Median;
    ///
    /// assert_eq!(Median::Exact(3_u8).to_f64(), 3.0);
    /// assert_eq!(Median::<u8>::Midpoint(3.5).to_f64(), 3.5);
    /// ```
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Median::Exact(value) => value.to_f64(),
            Median::Midpoint(mean) => *mean,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Median<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Median::Exact(value) => fmt::Display::fmt(value, f),
            Median::Midpoint(mean) => fmt::Display::fmt(mean, f),
        }
    }
}

/// Mean of two values, halving first when the sum would leave the finite range.
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum.is_finite() { sum / 2.0 } else { a / 2.0 + b / 2.0 }
}
