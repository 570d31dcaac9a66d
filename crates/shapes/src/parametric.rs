//! Closed-form closed curves sampled into polygons.
//!
//! Every shape reads its centre from `center_x` / `center_y` (default: the
//! middle of a 1200x1000 canvas) and, where it is sampled from a
//! parametrisation, its vertex count from `samples`.

use curve_flow_core::error::CurveError;
use curve_flow_core::geometry::Point;
use curve_flow_core::params::{param_f64, param_usize};
use glam::DVec2;
use serde_json::Value;
use std::f64::consts::TAU;

const DEFAULT_CENTER: DVec2 = DVec2::new(600.0, 500.0);
const DEFAULT_SAMPLES: usize = 200;
const MIN_SAMPLES: usize = 3;
/// Upper bound on lengths (radius, size, scale). The resampler splits every
/// edge down to a few units, so vertex count grows with the outline length.
pub const MAX_EXTENT: f64 = 1.0e5;
/// Upper bound on sampled vertex count.
pub const MAX_SAMPLES: usize = 100_000;
const MAX_CUSPS: usize = 100;

/// Samples `f` at `samples` evenly spaced parameters in `[0, 2π)`.
pub fn sample_closed(samples: usize, f: impl Fn(f64) -> Point) -> Vec<Point> {
    (0..samples)
        .map(|i| f(TAU * i as f64 / samples as f64))
        .collect()
}

pub(crate) fn center(params: &Value) -> DVec2 {
    DVec2::new(
        param_f64(params, "center_x", DEFAULT_CENTER.x),
        param_f64(params, "center_y", DEFAULT_CENTER.y),
    )
}

pub(crate) fn samples(params: &Value) -> Result<usize, CurveError> {
    let samples = param_usize(params, "samples", DEFAULT_SAMPLES);
    if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&samples) {
        return Err(CurveError::InvalidParam {
            name: "samples".into(),
            reason: format!("must be in {MIN_SAMPLES}..={MAX_SAMPLES}, got {samples}"),
        });
    }
    Ok(samples)
}

pub(crate) fn positive(params: &Value, name: &str, default: f64) -> Result<f64, CurveError> {
    let value = param_f64(params, name, default);
    if !value.is_finite() || value <= 0.0 {
        return Err(CurveError::InvalidParam {
            name: name.into(),
            reason: format!("must be positive and finite, got {value}"),
        });
    }
    if value > MAX_EXTENT {
        return Err(CurveError::InvalidParam {
            name: name.into(),
            reason: format!("must be at most {MAX_EXTENT}, got {value}"),
        });
    }
    Ok(value)
}

/// Circle sampled at `samples` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub samples: usize,
}

impl Circle {
    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        Ok(Self {
            center: center(params),
            radius: positive(params, "radius", 200.0)?,
            samples: samples(params)?,
        })
    }

    pub fn points(&self) -> Vec<Point> {
        sample_closed(self.samples, |t| {
            self.center + self.radius * DVec2::new(t.cos(), t.sin())
        })
    }
}

/// Axis-aligned ellipse with semi-axes `rx`, `ry`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: DVec2,
    pub rx: f64,
    pub ry: f64,
    pub samples: usize,
}

impl Ellipse {
    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        Ok(Self {
            center: center(params),
            rx: positive(params, "rx", 300.0)?,
            ry: positive(params, "ry", 120.0)?,
            samples: samples(params)?,
        })
    }

    pub fn points(&self) -> Vec<Point> {
        sample_closed(self.samples, |t| {
            self.center + DVec2::new(self.rx * t.cos(), self.ry * t.sin())
        })
    }
}

/// Axis-aligned square given by its four corners only; the resampler
/// subdivides the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub center: DVec2,
    pub size: f64,
}

impl Square {
    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        Ok(Self {
            center: center(params),
            size: positive(params, "size", 300.0)?,
        })
    }

    pub fn points(&self) -> Vec<Point> {
        let h = self.size / 2.0;
        [(-h, -h), (h, -h), (h, h), (-h, h)]
            .into_iter()
            .map(|(x, y)| self.center + DVec2::new(x, y))
            .collect()
    }
}

/// Epicycloid traced by a circle of radius `radius` rolling around a fixed
/// circle `cusps` times as large:
/// `r(k+1)·(cos t, sin t) − r·(cos (k+1)t, sin (k+1)t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epicycloid {
    pub center: DVec2,
    pub radius: f64,
    pub cusps: usize,
    pub samples: usize,
}

impl Epicycloid {
    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        let cusps = param_usize(params, "cusps", 5);
        if !(1..=MAX_CUSPS).contains(&cusps) {
            return Err(CurveError::InvalidParam {
                name: "cusps".into(),
                reason: format!("must be in 1..={MAX_CUSPS}, got {cusps}"),
            });
        }
        Ok(Self {
            center: center(params),
            radius: positive(params, "radius", 50.0)?,
            cusps,
            samples: samples(params)?,
        })
    }

    pub fn points(&self) -> Vec<Point> {
        let k = self.cusps as f64;
        let r = self.radius;
        sample_closed(self.samples, |t| {
            let outer = r * (k + 1.0) * DVec2::new(t.cos(), t.sin());
            let inner = r * DVec2::new(((k + 1.0) * t).cos(), ((k + 1.0) * t).sin());
            self.center + outer - inner
        })
    }
}

/// Lemniscate of Bernoulli with half-width `scale`. The figure eight crosses
/// itself at the centre; the flow does not resolve the crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lemniscate {
    pub center: DVec2,
    pub scale: f64,
    pub samples: usize,
}

impl Lemniscate {
    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        Ok(Self {
            center: center(params),
            scale: positive(params, "scale", 400.0)?,
            samples: samples(params)?,
        })
    }

    pub fn points(&self) -> Vec<Point> {
        sample_closed(self.samples, |t| {
            let d = 1.0 + t.sin() * t.sin();
            self.center + self.scale * DVec2::new(t.cos() / d, t.sin() * t.cos() / d)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_flow_core::curve::enclosed_area;
    use serde_json::json;

    #[test]
    fn sample_closed_does_not_repeat_start() {
        let pts = sample_closed(4, |t| DVec2::new(t.cos(), t.sin()));
        assert_eq!(pts.len(), 4);
        assert!((pts[0] - DVec2::new(1.0, 0.0)).length() < 1e-12);
        assert!((pts[2] - DVec2::new(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn circle_points_lie_on_circle() {
        let c = Circle::from_json(&json!({"radius": 80.0, "samples": 36})).unwrap();
        let pts = c.points();
        assert_eq!(pts.len(), 36);
        for p in &pts {
            assert!((p.distance(DEFAULT_CENTER) - 80.0).abs() < 1e-9);
        }
    }

    #[test]
    fn square_has_four_corners_and_expected_area() {
        let s = Square::from_json(&json!({"size": 100.0, "center_x": 50.0, "center_y": 50.0}))
            .unwrap();
        let pts = s.points();
        assert_eq!(pts[0], DVec2::new(0.0, 0.0));
        assert_eq!(pts[2], DVec2::new(100.0, 100.0));
        assert!((enclosed_area(&pts) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn ellipse_area_approaches_pi_ab() {
        let e = Ellipse::from_json(&json!({"rx": 100.0, "ry": 40.0, "samples": 2000})).unwrap();
        let expected = std::f64::consts::PI * 100.0 * 40.0;
        assert!((enclosed_area(&e.points()) - expected).abs() / expected < 1e-4);
    }

    #[test]
    fn epicycloid_cusps_touch_base_circle() {
        let e = Epicycloid::from_json(&json!({"radius": 10.0, "cusps": 4, "samples": 400}))
            .unwrap();
        let pts = e.points();
        // t = 0 is a cusp at distance k*r from the centre.
        assert!((pts[0].distance(DEFAULT_CENTER) - 40.0).abs() < 1e-9);
        let farthest = pts
            .iter()
            .map(|p| p.distance(DEFAULT_CENTER))
            .fold(0.0, f64::max);
        assert!((farthest - 60.0).abs() < 1e-2, "farthest {farthest}");
    }

    #[test]
    fn lemniscate_passes_through_center() {
        let l = Lemniscate::from_json(&json!({"scale": 100.0, "samples": 8})).unwrap();
        let pts = l.points();
        assert!((pts[0] - (DEFAULT_CENTER + DVec2::new(100.0, 0.0))).length() < 1e-9);
        assert!((pts[2] - DEFAULT_CENTER).length() < 1e-9);
    }

    #[test]
    fn too_few_samples_is_invalid() {
        let err = Circle::from_json(&json!({"samples": 2})).unwrap_err();
        assert!(matches!(err, CurveError::InvalidParam { ref name, .. } if name == "samples"));
    }

    #[test]
    fn non_positive_size_is_invalid() {
        assert!(Square::from_json(&json!({"size": 0.0})).is_err());
        assert!(Circle::from_json(&json!({"radius": -5.0})).is_err());
    }

    #[test]
    fn zero_cusps_is_invalid() {
        assert!(Epicycloid::from_json(&json!({"cusps": 0})).is_err());
        assert!(Epicycloid::from_json(&json!({"cusps": 1_000_000})).is_err());
    }

    #[test]
    fn oversized_extent_is_invalid() {
        let err = Square::from_json(&json!({"size": 1e9})).unwrap_err();
        assert!(matches!(err, CurveError::InvalidParam { ref name, .. } if name == "size"));
        assert!(Circle::from_json(&json!({"radius": MAX_EXTENT * 2.0})).is_err());
        assert!(Lemniscate::from_json(&json!({"scale": 1e12})).is_err());
        assert!(Square::from_json(&json!({"size": MAX_EXTENT})).is_ok());
    }

    #[test]
    fn too_many_samples_is_invalid() {
        assert!(Circle::from_json(&json!({"samples": MAX_SAMPLES + 1})).is_err());
    }
}
