//! The `Engine` trait implemented by curve evolution engines.
//!
//! The trait is object-safe so a shell can drive `dyn Engine` without knowing
//! the concrete flow.

use crate::error::CurveError;
use crate::geometry::{Point, Vector2};
use serde_json::Value;

/// A frame-stepped evolution of a closed polygon.
///
/// This trait is **object-safe**: you can use `Box<dyn Engine>` or `&dyn Engine`
/// for runtime polymorphism.
pub trait Engine {
    /// Advance the curve by one display frame.
    ///
    /// Returns `CurveError::DegenerateCurve` once the curve can no longer be
    /// evolved; the caller should discard it rather than retry.
    fn step(&mut self) -> Result<(), CurveError>;

    /// Current vertices.
    fn curve(&self) -> &[Point];

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Per-vertex curvature from the most recent step, if the engine keeps it.
    fn curvature(&self) -> Option<&[f64]> {
        None
    }

    /// Per-vertex inward directions from the most recent step, if kept.
    fn directions(&self) -> Option<&[Vector2]> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use serde_json::json;

    /// Engine that translates the curve by one unit per step.
    struct DriftEngine {
        points: Vec<Point>,
        steps: usize,
    }

    impl DriftEngine {
        fn new() -> Self {
            Self {
                points: vec![
                    DVec2::new(0.0, 0.0),
                    DVec2::new(1.0, 0.0),
                    DVec2::new(0.0, 1.0),
                ],
                steps: 0,
            }
        }
    }

    impl Engine for DriftEngine {
        fn step(&mut self) -> Result<(), CurveError> {
            for p in &mut self.points {
                p.x += 1.0;
            }
            self.steps += 1;
            Ok(())
        }

        fn curve(&self) -> &[Point] {
            &self.points
        }

        fn params(&self) -> Value {
            json!({"steps": self.steps})
        }

        fn param_schema(&self) -> Value {
            json!({
                "steps": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of steps executed"
                }
            })
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let engine: Box<dyn Engine> = Box::new(DriftEngine::new());
        assert_eq!(engine.curve().len(), 3);
    }

    #[test]
    fn step_mutates_curve() {
        let mut engine = DriftEngine::new();
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.curve()[0], DVec2::new(2.0, 0.0));
        assert_eq!(engine.params()["steps"], 2);
    }

    #[test]
    fn param_schema_has_expected_structure() {
        let schema = DriftEngine::new().param_schema();
        assert_eq!(schema["steps"]["type"], "integer");
    }

    #[test]
    fn default_samples_are_none() {
        let engine = DriftEngine::new();
        assert!(engine.curvature().is_none());
        assert!(engine.directions().is_none());
    }

    #[test]
    fn dyn_engine_mut_reference_works() {
        let mut engine = DriftEngine::new();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.step().unwrap();
        assert_eq!(engine_ref.params()["steps"], 1);
    }
}
