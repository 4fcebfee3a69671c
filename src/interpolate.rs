//! Piecewise linear interpolation of tabulated spanwise data.
//!
//! Both the planform lookups (chord and leading edge at a lattice station)
//! and the re-sampling of solved distributions onto output stations
//! go through the functions here.
//! Tables are assumed to have strictly increasing abscissae,
//! which [`PlanformGeometry`][crate::PlanformGeometry] checks on construction.

use itertools::Itertools;

/// Generate `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// The last value is exactly `end` so that lookups at the end station
/// hit the table knot instead of a rounding error away from it.
/// ```
/// # use blackwell::interpolate::linspace;
/// assert_eq!(linspace(0., 1., 5), vec![0., 0.25, 0.5, 0.75, 1.]);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Evaluate the piecewise linear function through `(xs, ys)` at `x`.
///
/// Values outside the table are extrapolated linearly
/// from the first or last segment.
/// A table with a single point is treated as a constant.
///
/// Panics if the tables are empty or of different lengths.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    assert!(!xs.is_empty(), "cannot interpolate an empty table");
    assert_eq!(xs.len(), ys.len(), "mismatched interpolation table lengths");

    if xs.len() == 1 {
        return ys[0];
    }

    // index of the segment [xs[seg], xs[seg + 1]] used for x,
    // clamped to the end segments for extrapolation
    let seg = xs.partition_point(|&xi| xi <= x).clamp(1, xs.len() - 1) - 1;
    let (x0, x1) = (xs[seg], xs[seg + 1]);
    let (y0, y1) = (ys[seg], ys[seg + 1]);
    let t = (x - x0) / (x1 - x0);
    // written as a blend so that knots are reproduced exactly
    (1. - t) * y0 + t * y1
}

/// Evaluate the piecewise linear function through `(xs, ys)`
/// at every point of `targets`.
pub fn interpolate_all(xs: &[f64], ys: &[f64], targets: &[f64]) -> Vec<f64> {
    targets.iter().map(|&x| interpolate(xs, ys, x)).collect()
}

/// Check that a table of abscissae is strictly increasing.
/// Returns the index of the first offending value otherwise.
pub(crate) fn find_non_increasing(xs: &[f64]) -> Option<usize> {
    xs.iter()
        .tuple_windows()
        .position(|(a, b)| !(a < b))
        .map(|i| i + 1)
}

//
// tests
//
