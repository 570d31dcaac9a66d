//! Irregular star-shaped curve: a circle whose radius is modulated by
//! Perlin noise sampled around a loop, so the outline closes seamlessly.

use curve_flow_core::error::CurveError;
use curve_flow_core::geometry::Point;
use curve_flow_core::params::{param_f64, param_u32};
use glam::DVec2;
use noise::{NoiseFn, Perlin};
use serde_json::Value;

use crate::parametric::{center, positive, sample_closed, samples};

/// Noise-perturbed circle.
///
/// The radius at angle `t` is `radius · (1 + amplitude · n(t))` with
/// `n ∈ [-1, 1]` Perlin noise sampled on a circle of radius `frequency` in
/// noise space. `amplitude < 1` keeps the radius positive, so the outline
/// never crosses itself.
pub struct Blob {
    pub center: DVec2,
    pub radius: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub samples: usize,
    noise: Perlin,
}

impl Blob {
    pub fn new(
        center: DVec2,
        radius: f64,
        amplitude: f64,
        frequency: f64,
        samples: usize,
        seed: u32,
    ) -> Self {
        Self {
            center,
            radius,
            amplitude,
            frequency,
            samples,
            noise: Perlin::new(seed),
        }
    }

    pub fn from_json(params: &Value) -> Result<Self, CurveError> {
        let amplitude = param_f64(params, "amplitude", 0.4);
        if !(0.0..1.0).contains(&amplitude) {
            return Err(CurveError::InvalidParam {
                name: "amplitude".into(),
                reason: format!("must be in [0, 1), got {amplitude}"),
            });
        }
        Ok(Self::new(
            center(params),
            positive(params, "radius", 250.0)?,
            amplitude,
            positive(params, "frequency", 1.5)?,
            samples(params)?,
            param_u32(params, "seed", 42),
        ))
    }

    pub fn points(&self) -> Vec<Point> {
        sample_closed(self.samples, |t| {
            let dir = DVec2::new(t.cos(), t.sin());
            let n = self
                .noise
                .get([self.frequency * dir.x, self.frequency * dir.y])
                .clamp(-1.0, 1.0);
            self.center + self.radius * (1.0 + self.amplitude * n) * dir
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn same_seed_same_outline() {
        let a = Blob::from_json(&json!({"seed": 7})).unwrap().points();
        let b = Blob::from_json(&json!({"seed": 7})).unwrap().points();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_outline() {
        let a = Blob::from_json(&json!({"seed": 1})).unwrap().points();
        let b = Blob::from_json(&json!({"seed": 2})).unwrap().points();
        assert_ne!(a, b);
    }

    #[test]
    fn radius_stays_within_amplitude_band() {
        let blob = Blob::from_json(&json!({"radius": 100.0, "amplitude": 0.3})).unwrap();
        for p in blob.points() {
            let r = p.distance(blob.center);
            assert!((70.0 - 1e-9..=130.0 + 1e-9).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn amplitude_of_one_is_rejected() {
        assert!(Blob::from_json(&json!({"amplitude": 1.0})).is_err());
        assert!(Blob::from_json(&json!({"amplitude": -0.1})).is_err());
    }

    #[test]
    fn zero_amplitude_is_a_circle() {
        let blob = Blob::from_json(&json!({"radius": 60.0, "amplitude": 0.0})).unwrap();
        for p in blob.points() {
            assert!((p.distance(blob.center) - 60.0).abs() < 1e-9);
        }
    }
}
