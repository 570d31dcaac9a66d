//! Stateless 2D geometry primitives used by the resampler and the flow
//! integrator.
//!
//! Degenerate inputs never fail: [`unit_vector`] returns the zero vector and
//! [`circumradius`] returns `0.0` when the quantity is undefined.

use glam::DVec2;

/// A curve vertex.
pub type Point = DVec2;

/// A displacement or direction.
pub type Vector2 = DVec2;

/// Relative determinant threshold below which three points count as collinear.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Euclidean distance between two points.
pub fn distance(p0: Point, p1: Point) -> f64 {
    p0.distance(p1)
}

/// Point halfway between `p0` and `p1`.
pub fn midpoint(p0: Point, p1: Point) -> Point {
    (p0 + p1) * 0.5
}

/// Normalizes `v`. Returns exactly [`DVec2::ZERO`] when `v` has zero length.
pub fn unit_vector(v: Vector2) -> Vector2 {
    let size = v.length();
    if size == 0.0 {
        return DVec2::ZERO;
    }
    v / size
}

/// Radius of the circle through `p0`, `p1`, `p2`.
///
/// Translates `p0` to the origin and solves the 2x2 system
/// `[2a; 2b] · c = [a·a; b·b]` (with `a = p1 - p0`, `b = p2 - p0`) for the
/// centre `c`. Returns `0.0` when the system is singular or ill-conditioned,
/// i.e. the points are (nearly) collinear or coincident.
pub fn circumradius(p0: Point, p1: Point, p2: Point) -> f64 {
    let a = p1 - p0;
    let b = p2 - p0;

    let det = 4.0 * a.perp_dot(b);
    let scale = 4.0 * a.length() * b.length();
    if !det.is_finite() || det.abs() <= SINGULAR_TOLERANCE * scale {
        return 0.0;
    }

    let ra = a.length_squared();
    let rb = b.length_squared();
    let center = DVec2::new(
        (ra * 2.0 * b.y - 2.0 * a.y * rb) / det,
        (2.0 * a.x * rb - 2.0 * b.x * ra) / det,
    );
    let r = center.length();
    if r.is_finite() {
        r
    } else {
        0.0
    }
}
