use std::collections::VecDeque;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wabi_window::{Median, MedianWindow, Sample, SlidingMedian, TotalF64, WindowError, sliding_medians};

/// Values in a narrow range so duplicates and ties at the boundary are common.
fn value_strategy() -> impl Strategy<Value = i32> {
    -30i32..30i32
}

/// Median of a window by sorting a copy of it.
fn brute_force_median(window: &[i32]) -> Median<i32> {
    let mut sorted = window.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Median::Exact(sorted[mid])
    } else {
        Median::Midpoint((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    }
}

/// Checks the ordering and size relation between the two halves.
fn assert_halves<T: Sample + std::fmt::Debug>(window: &MedianWindow<T>) {
    let (low, high) = (window.low(), window.high());
    assert!(
        low.len() == high.len() || low.len() == high.len() + 1,
        "size invariant broken: low {low:?}, high {high:?}"
    );
    if let (Some(max), Some(min)) = (low.last(), high.first()) {
        assert!(max <= min, "order invariant broken: low {low:?}, high {high:?}");
    }
    assert_eq!(window.len(), low.len() + high.len());
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum WindowOp {
    Insert(i32),
    /// Removes the tracked value at `index % len`, if any.
    RemoveTracked(usize),
    /// Removes an arbitrary value that may or may not be tracked.
    RemoveAny(i32),
    Median,
}

fn window_op_strategy() -> impl Strategy<Value = WindowOp> {
    prop_oneof![
        5 => value_strategy().prop_map(WindowOp::Insert),
        3 => any::<usize>().prop_map(WindowOp::RemoveTracked),
        1 => (-40i32..40).prop_map(WindowOp::RemoveAny),
        2 => Just(WindowOp::Median),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Random inserts and removes against a plain `Vec` of tracked values.
    #[test]
    fn window_matches_brute_force(ops in proptest::collection::vec(window_op_strategy(), 0..600)) {
        let mut window = MedianWindow::new();
        let mut tracked: Vec<i32> = Vec::new();
        let (mut inserts, mut removes) = (0usize, 0usize);

        for op in &ops {
            match *op {
                WindowOp::Insert(v) => {
                    window.insert(v);
                    tracked.push(v);
                    inserts += 1;
                }
                WindowOp::RemoveTracked(index) => {
                    if tracked.is_empty() {
                        continue;
                    }
                    let v = tracked.swap_remove(index % tracked.len());
                    prop_assert_eq!(window.remove(&v), Ok(()));
                    removes += 1;
                }
                WindowOp::RemoveAny(v) => {
                    let expected = match tracked.iter().position(|&t| t == v) {
                        Some(index) => {
                            tracked.swap_remove(index);
                            removes += 1;
                            Ok(())
                        }
                        None => Err(WindowError::ValueNotFound),
                    };
                    prop_assert_eq!(window.remove(&v), expected);
                }
                WindowOp::Median => {
                    let expected = if tracked.is_empty() {
                        Err(WindowError::EmptyWindow)
                    } else {
                        Ok(brute_force_median(&tracked))
                    };
                    prop_assert_eq!(window.median(), expected);
                    // Reads do not disturb the window.
                    prop_assert_eq!(window.median(), expected);
                }
            }
            assert_halves(&window);
            prop_assert_eq!(window.len(), inserts - removes);
        }
    }

    /// The sliding driver agrees with sorting every window.
    #[test]
    fn sliding_matches_sorted_windows(
        values in proptest::collection::vec(value_strategy(), 0..300),
        k in 1usize..20,
    ) {
        let expected: Vec<Median<i32>> = values.windows(k).map(brute_force_median).collect();
        prop_assert_eq!(sliding_medians(values.iter().copied(), k), Ok(expected));
    }

    /// Between pushes the driver's window holds exactly the last `k - 1` values.
    #[test]
    fn sliding_tracks_exact_window(values in proptest::collection::vec(value_strategy(), 1..200), k in 1usize..10) {
        let mut sliding = SlidingMedian::new(k).unwrap();
        let mut recent: VecDeque<i32> = VecDeque::new();

        for &v in &values {
            let median = sliding.push(v).unwrap();
            recent.push_back(v);
            prop_assert_eq!(median.is_some(), recent.len() == k);
            if recent.len() == k {
                recent.pop_front();
            }

            let mut expected: Vec<i32> = recent.iter().copied().collect();
            expected.sort_unstable();
            let actual: Vec<i32> = sliding.window().iter().copied().collect();
            prop_assert_eq!(actual, expected);
            assert_halves(sliding.window());
        }
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn sample_stream_with_window_of_three() {
    let medians = sliding_medians([1, 3, -1, -3, 5, 3, 6, 7], 3).unwrap();
    assert_eq!(
        medians,
        [1, -1, -1, 3, 5, 6].map(Median::Exact).to_vec(),
        "{{1,3,-1}} {{3,-1,-3}} {{-1,-3,5}} {{-3,5,3}} {{5,3,6}} {{3,6,7}}"
    );
}

#[test]
fn window_of_one_echoes_the_stream() {
    let values = [4_i64, -9, 0, 4, i64::MAX, i64::MIN];
    let medians = sliding_medians(values, 1).unwrap();
    assert_eq!(medians, values.map(Median::Exact).to_vec());
}

#[test]
fn equal_values_split_evenly() {
    let mut window = MedianWindow::new();
    for _ in 0..4 {
        window.insert(2);
    }
    assert_eq!(window.low().len(), 2);
    assert_eq!(window.high().len(), 2);
    assert_eq!(window.median(), Ok(Median::Midpoint(2.0)));
    assert_eq!(window.median().unwrap().to_string(), "2");
}

#[test]
fn even_window_reports_exact_half() {
    let medians = sliding_medians([1, 2, 2, 3], 2).unwrap();
    let printed: Vec<String> = medians.iter().map(ToString::to_string).collect();
    assert_eq!(printed, ["1.5", "2", "2.5"]);
}

#[test]
fn midpoint_of_extremes_does_not_overflow() {
    let mut window = MedianWindow::new();
    window.insert(i64::MAX);
    window.insert(i64::MAX);
    assert_eq!(window.median().unwrap().to_f64(), i64::MAX as f64);

    let mut window = MedianWindow::new();
    window.insert(TotalF64(f64::MAX));
    window.insert(TotalF64(f64::MAX));
    assert_eq!(window.median(), Ok(Median::Midpoint(f64::MAX)));
}

#[test]
fn odd_windows_keep_the_stored_type() {
    let mut window = MedianWindow::new();
    for v in [u8::MAX, 0, 7] {
        window.insert(v);
    }
    assert_eq!(window.median(), Ok(Median::Exact(7_u8)));
    assert_eq!(window.median().unwrap().exact(), Some(7));
}

#[test]
fn removing_untracked_values_fails() {
    let mut window = MedianWindow::new();
    window.insert(1);
    window.insert(2);

    // Never inserted.
    assert_eq!(window.remove(&3), Err(WindowError::ValueNotFound));

    // Already removed.
    window.remove(&2).unwrap();
    assert_eq!(window.remove(&2), Err(WindowError::ValueNotFound));

    assert_eq!(window.len(), 1);
    assert_eq!(window.median(), Ok(Median::Exact(1)));
}

#[test]
fn emptied_window_has_no_median() {
    let mut window = MedianWindow::new();
    window.insert(-5);
    window.remove(&-5).unwrap();
    assert!(window.is_empty());
    assert_eq!(window.median(), Err(WindowError::EmptyWindow));
    assert_eq!(window.remove(&-5), Err(WindowError::ValueNotFound));
}

#[test]
fn float_window_with_signed_zeros() {
    let values = [0.0, -0.0, 1.5, -2.5].map(TotalF64);
    let medians = sliding_medians(values, 3).unwrap();
    assert_eq!(medians, [Median::Exact(TotalF64(0.0)), Median::Exact(TotalF64(-0.0))].to_vec());
}

#[test]
fn errors_render_for_humans() {
    assert_eq!(WindowError::ValueNotFound.to_string(), "value is not tracked by the window");
    assert_eq!(WindowError::EmptyWindow.to_string(), "median requested from an empty window");
    assert_eq!(WindowError::ZeroWindow.to_string(), "window size must be at least 1");
}
