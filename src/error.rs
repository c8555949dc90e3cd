/// Errors reported by [`MedianWindow`](crate::MedianWindow) and
/// [`SlidingMedian`](crate::SlidingMedian).
///
/// None of these are transient: each one means the caller's bookkeeping of
/// what the window holds is already wrong, so the tracking session should be
/// abandoned rather than retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// `remove` was called with a value held by neither half of the window.
    #[error("value is not tracked by the window")]
    ValueNotFound,

    /// `median` was called while the window holds no values.
    #[error("median requested from an empty window")]
    EmptyWindow,

    /// A sliding driver was asked for a window of zero values.
    #[error("window size must be at least 1")]
    ZeroWindow,
}
