//! Modular index arithmetic for closed polygons.
//!
//! Index `len` wraps to `0` and the predecessor of `0` is `len - 1`. All
//! neighbour lookups in the workspace go through these helpers.

use crate::geometry::Point;

/// Index of the vertex before `i` on a ring of `len` vertices.
///
/// `len` must be non-zero.
pub fn prev(i: usize, len: usize) -> usize {
    if i == 0 {
        len - 1
    } else {
        i - 1
    }
}

/// Index of the vertex after `i` on a ring of `len` vertices.
///
/// `len` must be non-zero.
pub fn next(i: usize, len: usize) -> usize {
    (i + 1) % len
}

/// The vertex at `i` together with its cyclic predecessor and successor,
/// returned as `(p[i-1], p[i], p[i+1])`.
///
/// # Panics
///
/// Panics if `points` is empty or `i >= points.len()`.
pub fn neighbors(points: &[Point], i: usize) -> (Point, Point, Point) {
    let len = points.len();
    (points[prev(i, len)], points[i], points[next(i, len)])
}

/// Length of the edge entering vertex `i`, i.e. `|p[i] - p[i-1]|`.
pub fn incoming_edge(points: &[Point], i: usize) -> f64 {
    points[prev(i, points.len())].distance(points[i])
}
