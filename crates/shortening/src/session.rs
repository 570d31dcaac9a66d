//! Frame-by-frame driver for curve-shortening flow.
//!
//! [`FlowSession`] holds the state an interactive shell keeps between frames:
//! the polygon, the speed control, the current graininess, and whether the
//! next frame should densify or decimate. Each [`FlowSession::frame`] runs one
//! resample pass, then one batch of integrator sub-steps, then re-derives
//! graininess from the curve's area.
//!
//! A paused session does not evolve. Each frame it only densifies at the
//! coarser `graininess · speed` spacing and re-derives graininess.

use curve_flow_core::curve::{
    adaptive_graininess, normalized_area, perimeter, ReferenceCanvas, MIN_VERTICES,
};
use curve_flow_core::error::CurveError;
use curve_flow_core::geometry::{Point, Vector2};
use curve_flow_core::params::{param_bool, param_f64, param_u32};
use curve_flow_core::scenario::DEFAULT_SUB_STEPS;
use curve_flow_core::Engine;
use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::flow::{evolve_with, FlowOptions};
use crate::resample::{decimate, densify};

/// Default speed control.
const DEFAULT_SPEED: f64 = 1.0;
/// Default graininess before the first frame re-derives it.
const DEFAULT_GRAININESS: f64 = 1.0;
/// Factor applied by one press of the speed controls.
const SPEED_FACTOR: f64 = 1.1;
/// `speed · graininess` is divided by this to get the per-frame step size
/// and resampling graininess.
const STEP_DIVISOR: f64 = 10.0;
/// Multiplier from normalized area to the reported area figure.
const AREA_DISPLAY_SCALE: f64 = 10.0;

/// Tunable parameters of a [`FlowSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    /// User speed control; scales step size and resampling together.
    pub speed: f64,
    /// Initial graininess, re-derived from the area after every frame.
    pub graininess: f64,
    /// Integrator sub-steps per frame.
    pub sub_steps: u32,
    /// Canvas used to normalize the enclosed area.
    pub canvas: ReferenceCanvas,
    /// Integrator options.
    pub options: FlowOptions,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            graininess: DEFAULT_GRAININESS,
            sub_steps: DEFAULT_SUB_STEPS,
            canvas: ReferenceCanvas::default(),
            options: FlowOptions::default(),
        }
    }
}

/// Reads a number that must be finite and positive, falling back to
/// `default` otherwise. A negative step size would push the curve outward.
fn positive_or(params: &Value, key: &str, default: f64) -> f64 {
    let value = param_f64(params, key, default);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("ignoring {key} = {value}, using {default}");
        default
    }
}

impl FlowParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// `speed` and `graininess` must be positive and finite; other values
    /// are replaced by the defaults.
    pub fn from_json(params: &Value) -> Self {
        let canvas = ReferenceCanvas::default();
        Self {
            speed: positive_or(params, "speed", DEFAULT_SPEED),
            graininess: positive_or(params, "graininess", DEFAULT_GRAININESS),
            sub_steps: param_u32(params, "sub_steps", DEFAULT_SUB_STEPS),
            canvas: ReferenceCanvas::new(
                param_f64(params, "canvas_width", canvas.width),
                param_f64(params, "canvas_height", canvas.height),
            ),
            options: FlowOptions {
                clamp_to_chord: param_bool(params, "clamp_to_chord", true),
            },
        }
    }
}

/// Summary of one [`FlowSession::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the frame just completed.
    pub frame: usize,
    /// Vertex count after the frame.
    pub vertices: usize,
    /// Vertices added by densify this frame.
    pub inserted: usize,
    /// Vertices removed by decimate this frame.
    pub removed: usize,
    /// Ten times the area normalized by the canvas.
    pub area: f64,
    /// Graininess derived for the next frame.
    pub graininess: f64,
    /// Total edge length after the frame.
    pub perimeter: f64,
    /// Largest curvature sample of the frame; `0.0` for a paused frame.
    pub max_curvature: f64,
    /// Whether the frame only resampled.
    pub paused: bool,
}

/// Explicit per-run state for curve-shortening flow.
pub struct FlowSession {
    points: Vec<Point>,
    params: FlowParams,
    densify_next: bool,
    paused: bool,
    frames: usize,
    curvatures: Vec<f64>,
    directions: Vec<Vector2>,
}

impl FlowSession {
    pub fn new(points: Vec<Point>, params: FlowParams) -> Self {
        Self {
            points,
            params,
            densify_next: false,
            paused: false,
            frames: 0,
            curvatures: Vec::new(),
            directions: Vec::new(),
        }
    }

    /// Creates a session from a JSON params object; see [`FlowParams::from_json`].
    pub fn from_json(points: Vec<Point>, json_params: &Value) -> Self {
        Self::new(points, FlowParams::from_json(json_params))
    }

    /// Brings a freshly drawn curve into the spacing band for the current
    /// graininess. Returns the number of inserted vertices.
    pub fn start(&mut self) -> usize {
        densify(&mut self.points, self.params.graininess)
    }

    /// Multiplies the speed by 1.1.
    pub fn speed_up(&mut self) {
        self.params.speed *= SPEED_FACTOR;
    }

    /// Divides the speed by 1.1 and makes the next frame densify instead of
    /// decimate.
    pub fn slow_down(&mut self) {
        self.params.speed /= SPEED_FACTOR;
        self.densify_next = true;
    }

    /// Stops evolving; later frames only resample.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.params.speed
    }

    pub fn graininess(&self) -> f64 {
        self.params.graininess
    }

    /// Number of evolving frames completed. Paused frames are not counted.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Step size and resampling graininess used by the next frame.
    pub fn frame_scale(&self) -> f64 {
        self.params.speed * self.params.graininess / STEP_DIVISOR
    }

    /// Area figure as reported in [`FrameReport::area`].
    pub fn area(&self) -> f64 {
        AREA_DISPLAY_SCALE * normalized_area(&self.points, &self.params.canvas)
    }

    /// Runs one frame: resample, evolve, re-derive graininess. While paused
    /// the frame only densifies; see [`FlowSession::pause`].
    ///
    /// On `CurveError::DegenerateCurve` the curve is discarded (left empty)
    /// and every later call fails the same way.
    pub fn frame(&mut self) -> Result<FrameReport, CurveError> {
        if self.paused {
            return self.paused_frame();
        }
        let scale = self.frame_scale();

        let (inserted, removed) = if std::mem::take(&mut self.densify_next) {
            (densify(&mut self.points, scale), 0)
        } else {
            match decimate(&mut self.points, scale) {
                Ok(removed) => (0, removed),
                Err(e) => return Err(self.discard(e)),
            }
        };

        let outcome = match evolve_with(
            &self.points,
            scale,
            self.params.sub_steps,
            &self.params.options,
        ) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.discard(e)),
        };
        let max_curvature = outcome.max_curvature();
        self.points = outcome.points;
        self.curvatures = outcome.curvatures;
        self.directions = outcome.directions;

        self.frames += 1;
        Ok(self.finish_frame(inserted, removed, max_curvature, false))
    }

    /// Densifies at `graininess · speed` and re-derives graininess without
    /// moving any vertex. A pending densify request from
    /// [`FlowSession::slow_down`] is dropped.
    fn paused_frame(&mut self) -> Result<FrameReport, CurveError> {
        self.densify_next = false;
        if self.points.len() < MIN_VERTICES {
            let vertices = self.points.len();
            return Err(self.discard(CurveError::DegenerateCurve { vertices }));
        }
        let inserted = densify(
            &mut self.points,
            self.params.graininess * self.params.speed,
        );
        self.curvatures.clear();
        self.directions.clear();
        Ok(self.finish_frame(inserted, 0, 0.0, true))
    }

    fn finish_frame(
        &mut self,
        inserted: usize,
        removed: usize,
        max_curvature: f64,
        paused: bool,
    ) -> FrameReport {
        let normalized = normalized_area(&self.points, &self.params.canvas);
        self.params.graininess = adaptive_graininess(normalized);

        let report = FrameReport {
            frame: self.frames,
            vertices: self.points.len(),
            inserted,
            removed,
            area: AREA_DISPLAY_SCALE * normalized,
            graininess: self.params.graininess,
            perimeter: perimeter(&self.points),
            max_curvature,
            paused,
        };
        debug!(
            "frame {}: {} vertices (+{} -{}), area {:.4}, graininess {:.3}",
            report.frame,
            report.vertices,
            report.inserted,
            report.removed,
            report.area,
            report.graininess
        );
        report
    }

    fn discard(&mut self, err: CurveError) -> CurveError {
        if !self.points.is_empty() {
            info!("curve collapsed after {} frames: {err}", self.frames);
        }
        self.points.clear();
        self.curvatures.clear();
        self.directions.clear();
        err
    }
}

impl Engine for FlowSession {
    fn step(&mut self) -> Result<(), CurveError> {
        self.frame().map(|_| ())
    }

    fn curve(&self) -> &[Point] {
        &self.points
    }

    fn params(&self) -> Value {
        json!({
            "speed": self.params.speed,
            "graininess": self.params.graininess,
            "sub_steps": self.params.sub_steps,
            "canvas_width": self.params.canvas.width,
            "canvas_height": self.params.canvas.height,
            "clamp_to_chord": self.params.options.clamp_to_chord,
        })
    }

    fn param_schema(&self) -> Value {
        let canvas = ReferenceCanvas::default();
        json!({
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "description": "Speed control; step size is speed * graininess / 10"
            },
            "graininess": {
                "type": "number",
                "default": DEFAULT_GRAININESS,
                "min": 0.0,
                "description": "Initial spacing scale, re-derived from the area each frame"
            },
            "sub_steps": {
                "type": "integer",
                "default": DEFAULT_SUB_STEPS,
                "min": 1,
                "description": "Integrator sub-steps per frame"
            },
            "canvas_width": {
                "type": "number",
                "default": canvas.width,
                "min": 0.0,
                "description": "Reference canvas width for area normalization"
            },
            "canvas_height": {
                "type": "number",
                "default": canvas.height,
                "min": 0.0,
                "description": "Reference canvas height for area normalization"
            },
            "clamp_to_chord": {
                "type": "boolean",
                "default": true,
                "description": "Keep each vertex from overshooting its neighbours' chord"
            }
        })
    }

    fn curvature(&self) -> Option<&[f64]> {
        if self.curvatures.is_empty() {
            None
        } else {
            Some(&self.curvatures)
        }
    }

    fn directions(&self) -> Option<&[Vector2]> {
        if self.directions.is_empty() {
            None
        } else {
            Some(&self.directions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn circle(n: usize, radius: f64) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / n as f64;
                DVec2::new(600.0 + radius * t.cos(), 500.0 + radius * t.sin())
            })
            .collect()
    }

    fn session(points: Vec<Point>) -> FlowSession {
        FlowSession::new(points, FlowParams::default())
    }

    // ---- Construction ----

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        let s = FlowSession::from_json(circle(10, 50.0), &json!({}));
        assert!((s.speed() - DEFAULT_SPEED).abs() < f64::EPSILON);
        assert!((s.graininess() - DEFAULT_GRAININESS).abs() < f64::EPSILON);
        assert_eq!(s.params()["sub_steps"], DEFAULT_SUB_STEPS);
        assert_eq!(s.params()["clamp_to_chord"], true);
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let params = json!({
            "speed": 2.0,
            "graininess": 3.0,
            "sub_steps": 8,
            "canvas_width": 800.0,
            "canvas_height": 600.0,
            "clamp_to_chord": false,
        });
        let s = FlowSession::from_json(circle(10, 50.0), &params);
        let p = s.params();
        assert!((p["speed"].as_f64().unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((p["graininess"].as_f64().unwrap() - 3.0).abs() < f64::EPSILON);
        assert_eq!(p["sub_steps"], 8);
        assert!((p["canvas_width"].as_f64().unwrap() - 800.0).abs() < f64::EPSILON);
        assert_eq!(p["clamp_to_chord"], false);
    }

    #[test]
    fn from_json_rejects_negative_and_nan_speed() {
        for bad in [json!({"speed": -2.0}), json!({"speed": 0.0}), json!({"speed": f64::NAN})] {
            let s = FlowSession::from_json(circle(10, 50.0), &bad);
            assert!((s.speed() - DEFAULT_SPEED).abs() < f64::EPSILON, "{bad}");
            assert!(s.frame_scale() > 0.0);
        }
        let s = FlowSession::from_json(circle(10, 50.0), &json!({"graininess": -1.0}));
        assert!((s.graininess() - DEFAULT_GRAININESS).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_negative_speed_still_shrinks() {
        let mut s = FlowSession::from_json(circle(60, 200.0), &json!({"speed": -5.0}));
        s.start();
        let before = s.area();
        s.frame().unwrap();
        assert!(s.area() < before);
    }

    #[test]
    fn param_schema_covers_every_param() {
        let s = session(circle(10, 50.0));
        let schema = s.param_schema();
        for key in s.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
            assert!(schema[key].get("type").is_some(), "{key} missing 'type'");
            assert!(schema[key].get("default").is_some(), "{key} missing 'default'");
            assert!(
                schema[key].get("description").is_some(),
                "{key} missing 'description'"
            );
        }
    }

    // ---- Controls ----

    #[test]
    fn speed_controls_scale_by_ten_percent() {
        let mut s = session(circle(10, 50.0));
        s.speed_up();
        assert!((s.speed() - 1.1).abs() < 1e-12);
        s.slow_down();
        s.slow_down();
        assert!((s.speed() - 1.0 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn frame_scale_combines_speed_and_graininess() {
        let s = FlowSession::new(
            circle(10, 50.0),
            FlowParams {
                speed: 2.0,
                graininess: 3.0,
                ..FlowParams::default()
            },
        );
        assert!((s.frame_scale() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn start_densifies_to_graininess_band() {
        let mut s = session(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(0.0, 100.0),
        ]);
        assert_eq!(s.start(), 60);
        assert_eq!(s.curve().len(), 64);
    }

    #[test]
    fn slow_down_makes_next_frame_densify() {
        let mut s = session(circle(8, 200.0));
        s.slow_down();
        let report = s.frame().unwrap();
        assert!(report.inserted > 0);
        assert_eq!(report.removed, 0);
        // The request is consumed by one frame.
        let report = s.frame().unwrap();
        assert_eq!(report.inserted, 0);
    }

    // ---- Frames ----

    #[test]
    fn frame_reports_state() {
        let mut s = session(circle(120, 200.0));
        s.start();
        let report = s.frame().unwrap();
        assert_eq!(report.frame, 1);
        assert_eq!(report.vertices, s.curve().len());
        assert!((report.area - s.area()).abs() < 1e-12);
        assert!(report.graininess >= 1.0);
        assert!((report.max_curvature - 1.0 / 200.0).abs() < 1e-3);
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn graininess_tracks_area() {
        // Area ~ pi * 400^2 / 1.2e6 ~ 0.42; graininess = 10 * 0.42.
        let mut s = session(circle(400, 400.0));
        s.start();
        let report = s.frame().unwrap();
        assert!(report.graininess > 4.0, "graininess {}", report.graininess);
        assert!((report.graininess - report.area).abs() < 1e-12);
    }

    #[test]
    fn samples_available_after_first_frame() {
        let mut s = session(circle(50, 100.0));
        assert!(s.curvature().is_none());
        assert!(s.directions().is_none());
        s.step().unwrap();
        assert_eq!(s.curvature().unwrap().len(), s.curve().len());
        assert_eq!(s.directions().unwrap().len(), s.curve().len());
    }

    #[test]
    fn circle_area_shrinks_over_frames() {
        let mut s = session(circle(200, 150.0));
        s.start();
        let mut area = s.area();
        for _ in 0..20 {
            let report = s.frame().unwrap();
            assert!(report.area <= area + 1e-12);
            area = report.area;
        }
    }

    #[test]
    fn small_circle_collapses_and_is_discarded() {
        let mut s = session(circle(30, 20.0));
        s.start();
        let mut collapsed = false;
        for _ in 0..10_000 {
            match s.frame() {
                Ok(report) => assert!(report.vertices >= 3),
                Err(CurveError::DegenerateCurve { .. }) => {
                    collapsed = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(collapsed, "circle never collapsed");
        assert!(s.curve().is_empty());
        assert!(s.curvature().is_none());
        assert!(matches!(
            s.frame(),
            Err(CurveError::DegenerateCurve { vertices: 0 })
        ));
    }

    #[test]
    fn paused_frame_resamples_without_moving() {
        let mut s = FlowSession::new(
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(400.0, 0.0),
                DVec2::new(400.0, 400.0),
                DVec2::new(0.0, 400.0),
            ],
            FlowParams {
                speed: 2.0,
                ..FlowParams::default()
            },
        );
        s.pause();
        s.slow_down();
        let report = s.frame().unwrap();
        assert!(report.paused);
        // Split limit is 6 + 5 * (1 * 2 / 1.1); 400 halves down to 12.5.
        assert_eq!(report.vertices, 128);
        assert_eq!(report.removed, 0);
        assert_eq!(report.frame, 0);
        assert_eq!(s.frames(), 0);
        assert!((report.perimeter - 1600.0).abs() < 1e-9);
        assert!((s.area() - 10.0 * 160_000.0 / 1_200_000.0).abs() < 1e-12);
        // 10 * normalized area = 1.333...
        assert!((s.graininess() - 4.0 / 3.0).abs() < 1e-12);
        assert!(s.curvature().is_none());

        // The slow-down request was dropped by the paused frame.
        s.resume();
        let report = s.frame().unwrap();
        assert!(!report.paused);
        assert_eq!(report.inserted, 0);
        assert_eq!(report.frame, 1);
    }

    #[test]
    fn paused_frame_with_too_few_points_discards() {
        let mut s = session(vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)]);
        s.pause();
        assert!(matches!(
            s.frame(),
            Err(CurveError::DegenerateCurve { vertices: 2 })
        ));
        assert!(s.curve().is_empty());
    }

    #[test]
    fn report_perimeter_matches_curve() {
        let mut s = session(circle(60, 200.0));
        s.start();
        let report = s.frame().unwrap();
        assert!((report.perimeter - perimeter(s.curve())).abs() < 1e-9);
        assert!(report.perimeter < std::f64::consts::TAU * 200.0);
    }

    #[test]
    fn too_few_points_fail_first_frame() {
        let mut s = session(vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)]);
        assert!(s.frame().is_err());
        assert!(s.curve().is_empty());
    }

    #[test]
    fn session_is_object_safe_engine() {
        let boxed: Box<dyn Engine> = Box::new(session(circle(10, 50.0)));
        assert_eq!(boxed.curve().len(), 10);
    }
}
