//! Adaptive resampling of a closed polygon.
//!
//! [`densify`] splits edges that are too long and [`decimate`] removes
//! vertices whose two adjacent edges are both too short. The spacing band is
//! set by `graininess`: edges end up no longer than `6 + 5g`, and a vertex
//! survives decimation unless both of its edges are shorter than `5 + 5g`.
//!
//! The two passes are independent; callers pick which one to run and when.

use curve_flow_core::curve::MIN_VERTICES;
use curve_flow_core::cyclic;
use curve_flow_core::error::CurveError;
use curve_flow_core::geometry::{distance, midpoint, Point};
use log::trace;

/// Base edge length above which [`densify`] splits an edge.
const SPLIT_BASE: f64 = 6.0;
/// Base edge length below which [`decimate`] may merge.
const MERGE_BASE: f64 = 5.0;
/// Edge length added per unit of graininess.
const SPACING_PER_GRAIN: f64 = 5.0;

/// Longest edge [`densify`] leaves in place for the given graininess.
///
/// Negative (or NaN) graininess is treated as zero.
pub fn split_threshold(graininess: f64) -> f64 {
    SPLIT_BASE + SPACING_PER_GRAIN * graininess.max(0.0)
}

/// Edge length below which [`decimate`] considers an edge short.
///
/// Negative (or NaN) graininess is treated as zero.
pub fn merge_threshold(graininess: f64) -> f64 {
    MERGE_BASE + SPACING_PER_GRAIN * graininess.max(0.0)
}

/// Inserts midpoints until every edge is at most [`split_threshold`] long.
///
/// Scans in index order, re-reading the length each iteration. When the edge
/// `(p[i-1], p[i])` is too long its midpoint is inserted at `i` and the same
/// index is tested again, so the left half keeps splitting until it fits
/// before the cursor moves on. One call therefore reaches the fixed point and
/// a second call inserts nothing.
///
/// Edges of non-finite length, and edges too short to split in floating
/// point, are left alone. Returns the number of inserted vertices.
pub fn densify(points: &mut Vec<Point>, graininess: f64) -> usize {
    let limit = split_threshold(graininess);
    let mut inserted = 0;
    let mut i = 0;
    while i < points.len() {
        let before = points[cyclic::prev(i, points.len())];
        let here = points[i];
        let gap = distance(before, here);
        if gap.is_finite() && gap > limit {
            let mid = midpoint(before, here);
            if mid != before && mid != here {
                points.insert(i, mid);
                inserted += 1;
                continue;
            }
        }
        i += 1;
    }
    trace!("densify: inserted {inserted} vertices (limit {limit:.3})");
    inserted
}

/// Removes every vertex whose incoming and outgoing edges are both shorter
/// than [`merge_threshold`].
///
/// Scans in index order; after a deletion the cursor stays put so the former
/// successor is tested next. Returns the number of removed vertices.
///
/// Returns `CurveError::DegenerateCurve` if the input has fewer than three
/// vertices or the pass would drop it below three. In that case `points` is
/// left unchanged and the caller should discard the curve.
pub fn decimate(points: &mut Vec<Point>, graininess: f64) -> Result<usize, CurveError> {
    if points.len() < MIN_VERTICES {
        return Err(CurveError::DegenerateCurve {
            vertices: points.len(),
        });
    }
    let limit = merge_threshold(graininess);
    let mut kept = points.clone();
    let mut i = 0;
    while i < kept.len() {
        let len = kept.len();
        let incoming = cyclic::incoming_edge(&kept, i);
        let outgoing = cyclic::incoming_edge(&kept, cyclic::next(i, len));
        if incoming < limit && outgoing < limit {
            if len == MIN_VERTICES {
                return Err(CurveError::DegenerateCurve { vertices: len - 1 });
            }
            kept.remove(i);
        } else {
            i += 1;
        }
    }
    let removed = points.len() - kept.len();
    *points = kept;
    trace!("decimate: removed {removed} vertices (limit {limit:.3})");
    Ok(removed)
}
