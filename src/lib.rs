//! Sliding-window medians over weight-balanced order-statistic bags.
//!
//! This crate tracks the median of the last `k` values of a stream. The window
//! is kept as two ordered bags (multisets): a low half holding the smaller
//! values and a high half holding the larger ones, sized so the median always
//! sits at their boundary.
//!
//! - [`MedianWindow`] - the two-halves window: `insert`, `remove` and an O(1) `median`
//! - [`SlidingMedian`] / [`sliding_medians`] - drive a window over a stream
//! - [`OSBag`] - the ordered bag backing each half, with O(1) `first`/`last`
//!   and O(log n) rank queries
//!
//! # Example
//!
//! ```
//! use wabi_window::{Median, MedianWindow, WindowError};
//!
//! let mut window = MedianWindow::new();
//! for value in [1, 3, -1] {
//!     window.insert(value);
//! }
//! assert_eq!(window.median(), Ok(Median::Exact(1)));
//!
//! // Slide forward: the oldest value leaves, the next one enters.
//! window.remove(&1)?;
//! window.insert(-3);
//! assert_eq!(window.median(), Ok(Median::Exact(-1)));
//!
//! // Removing a value the window never saw is a bookkeeping bug.
//! assert_eq!(window.remove(&42), Err(WindowError::ValueNotFound));
//! # Ok::<(), WindowError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Duplicates** - Repeated values share one tree node and are counted, not copied
//! - **Exact medians** - Odd windows report the stored value; only even windows average
//!
//! # Implementation
//!
//! Each bag is a weight-balanced binary tree with parameters `(3, 2)`, stored in
//! an arena and addressed by compact handles. Nodes carry the multiplicity of
//! their key plus subtree totals, which keep the tree balanced and make rank
//! queries O(log n). The smallest and largest nodes are cached after every
//! mutation.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod median;
mod order_statistic;
mod raw;
mod sliding;
mod window;

pub mod os_bag;

pub use error::WindowError;
pub use median::{Median, Sample, TotalF64};
pub use order_statistic::Rank;
pub use os_bag::OSBag;
pub use sliding::{SlidingMedian, sliding_medians};
pub use window::MedianWindow;
