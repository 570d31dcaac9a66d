//! Curvature-driven flow integrator.
//!
//! Each sub-step moves every vertex toward the midpoint of its two
//! neighbours by `VELOCITY_SCALE · ds · κ`, where κ is the reciprocal of the
//! circumradius through the vertex and its neighbours. All vertices of a
//! sub-step are computed from the previous sub-step's positions (a Jacobi
//! update): the integrator double-buffers instead of writing in place.
//!
//! Only the final sub-step is instrumented. Earlier sub-steps propagate
//! geometry and nothing else.

use curve_flow_core::curve::MIN_VERTICES;
use curve_flow_core::cyclic;
use curve_flow_core::error::CurveError;
use curve_flow_core::geometry::{circumradius, midpoint, unit_vector, Point, Vector2};
use glam::DVec2;

/// Velocity scale applied to `ds · κ`. Step sizes in `0..1` are tuned
/// against this value.
pub const VELOCITY_SCALE: f64 = 40.0;

/// Tunables of the integrator beyond step size and sub-step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowOptions {
    /// Limit each vertex's per-sub-step displacement to its distance from
    /// the midpoint of its neighbours, so it never crosses their chord.
    ///
    /// Without the limit the displacement grows like κ and diverges as the
    /// curve collapses to a point.
    pub clamp_to_chord: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            clamp_to_chord: true,
        }
    }
}

/// Result of [`evolve`]: the evolved polygon and the per-vertex samples of
/// the final sub-step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowOutcome {
    pub points: Vec<Point>,
    /// κ per vertex; `0.0` where the vertex did not move.
    pub curvatures: Vec<f64>,
    /// Estimated inward normal per vertex, or the zero vector where the
    /// vertex has no defined bend.
    pub directions: Vec<Vector2>,
}

impl FlowOutcome {
    /// Largest curvature sample, or `0.0` for an empty outcome.
    pub fn max_curvature(&self) -> f64 {
        self.curvatures.iter().copied().fold(0.0, f64::max)
    }
}

/// New position and samples for one vertex.
#[derive(Debug, Clone, Copy)]
struct VertexUpdate {
    position: Point,
    curvature: f64,
    direction: Vector2,
}

impl VertexUpdate {
    fn stationary(position: Point, direction: Vector2) -> Self {
        Self {
            position,
            curvature: 0.0,
            direction,
        }
    }
}

/// Applies the displacement rule to `p1` with neighbours `p0` and `p2`.
fn update_vertex(p0: Point, p1: Point, p2: Point, ds: f64, options: &FlowOptions) -> VertexUpdate {
    let bias = midpoint(p0, p2) - p1;
    let uv = unit_vector(bias);
    if uv == DVec2::ZERO {
        return VertexUpdate::stationary(p1, uv);
    }

    let r = circumradius(p0, p1, p2);
    if r == 0.0 {
        return VertexUpdate::stationary(p1, uv);
    }

    let kappa = 1.0 / r;
    if !kappa.is_finite() {
        return VertexUpdate::stationary(p1, uv);
    }
    let mut travel = VELOCITY_SCALE * ds * kappa;
    if options.clamp_to_chord {
        let limit = bias.length();
        travel = travel.clamp(-limit, limit);
    }
    let position = p1 + uv * travel;
    if !position.is_finite() {
        return VertexUpdate::stationary(p1, uv);
    }

    VertexUpdate {
        position,
        curvature: kappa,
        direction: uv,
    }
}

/// Evolves `points` with the default [`FlowOptions`].
///
/// See [`evolve_with`].
pub fn evolve(points: &[Point], step_size: f64, sub_steps: u32) -> Result<FlowOutcome, CurveError> {
    evolve_with(points, step_size, sub_steps, &FlowOptions::default())
}

/// Advances the closed polygon by `sub_steps` sub-steps of size `step_size`.
///
/// Runs `sub_steps - 1` uninstrumented sweeps and then one sweep that records
/// curvature and direction per vertex. A `sub_steps` of zero runs a single
/// instrumented sweep.
///
/// Returns `CurveError::DegenerateCurve` for fewer than three vertices.
pub fn evolve_with(
    points: &[Point],
    step_size: f64,
    sub_steps: u32,
    options: &FlowOptions,
) -> Result<FlowOutcome, CurveError> {
    let len = points.len();
    if len < MIN_VERTICES {
        return Err(CurveError::DegenerateCurve { vertices: len });
    }

    let mut current = points.to_vec();
    let mut next = Vec::with_capacity(len);
    for _ in 1..sub_steps.max(1) {
        next.clear();
        next.extend((0..len).map(|i| {
            let (p0, p1, p2) = cyclic::neighbors(&current, i);
            update_vertex(p0, p1, p2, step_size, options).position
        }));
        std::mem::swap(&mut current, &mut next);
    }

    let mut outcome = FlowOutcome {
        points: Vec::with_capacity(len),
        curvatures: Vec::with_capacity(len),
        directions: Vec::with_capacity(len),
    };
    for i in 0..len {
        let (p0, p1, p2) = cyclic::neighbors(&current, i);
        let update = update_vertex(p0, p1, p2, step_size, options);
        outcome.points.push(update.position);
        outcome.curvatures.push(update.curvature);
        outcome.directions.push(update.direction);
    }
    Ok(outcome)
}
