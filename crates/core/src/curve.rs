//! Closed polygonal curve and area measures.
//!
//! A [`Curve`] is an ordered, cyclically indexed list of points. The engine
//! only operates on curves with at least three vertices; anything smaller is
//! "not yet a shape".

use serde::{Deserialize, Serialize};

use crate::cyclic;
use crate::geometry::Point;

/// Minimum number of vertices for a curve to have curvature and area.
pub const MIN_VERTICES: usize = 3;

/// Multiplier applied to the normalized area when deriving graininess.
pub const GRAININESS_AREA_SCALE: f64 = 10.0;

/// Lower bound of adaptively derived graininess.
pub const MIN_GRAININESS: f64 = 1.0;

/// A closed polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<Point>,
}

impl Curve {
    /// Wraps a point list. No validation is performed; see [`Curve::is_shape`].
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the curve has enough vertices to be evolved.
    pub fn is_shape(&self) -> bool {
        self.points.len() >= MIN_VERTICES
    }

    /// Read-only access to the vertices.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the curve and returns its vertices.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Shoelace area; see [`enclosed_area`].
    pub fn enclosed_area(&self) -> f64 {
        enclosed_area(&self.points)
    }
}

impl From<Vec<Point>> for Curve {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// The reference surface used to turn an area into a dimensionless size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCanvas {
    pub width: f64,
    pub height: f64,
}

impl Default for ReferenceCanvas {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1000.0,
        }
    }
}

impl ReferenceCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas area in square units.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Divides `area` by the canvas area. Returns `0.0` for an empty canvas.
    pub fn normalize(&self, area: f64) -> f64 {
        let reference = self.area();
        if reference > 0.0 {
            area / reference
        } else {
            0.0
        }
    }
}

/// Absolute polygon area by the shoelace formula:
/// `|Σ (x[i-1]·y[i] − x[i]·y[i-1])| / 2`.
///
/// Returns `0.0` for fewer than three points.
pub fn enclosed_area(points: &[Point]) -> f64 {
    if points.len() < MIN_VERTICES {
        return 0.0;
    }
    let len = points.len();
    let twice: f64 = (0..len)
        .map(|i| points[cyclic::prev(i, len)].perp_dot(points[i]))
        .sum();
    twice.abs() / 2.0
}

/// [`enclosed_area`] divided by the area of `canvas`.
pub fn normalized_area(points: &[Point], canvas: &ReferenceCanvas) -> f64 {
    canvas.normalize(enclosed_area(points))
}

/// Spacing scale derived from a curve's normalized area:
/// `max(1, 10 · normalized_area)`.
///
/// Large curves resample coarsely, small or collapsing curves finely.
pub fn adaptive_graininess(normalized_area: f64) -> f64 {
    (GRAININESS_AREA_SCALE * normalized_area).max(MIN_GRAININESS)
}

/// Sum of all edge lengths of the closed polygon.
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    (0..points.len())
        .map(|i| cyclic::incoming_edge(points, i))
        .sum()
}
