//! Reproducible description of a flow run.
//!
//! A [`Scenario`] captures everything needed to replay a run: the starting
//! shape and its parameters, the flow speed, the number of sub-steps per
//! frame, and how many frames to run. It describes a run, not a curve; the
//! evolving polygon itself is never stored.

use crate::error::CurveError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of integrator sub-steps per frame.
pub const DEFAULT_SUB_STEPS: u32 = 5;

/// Reproducible description of a flow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub shape: String,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_sub_steps")]
    pub sub_steps: u32,
    pub frames: usize,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_speed() -> f64 {
    1.0
}

fn default_sub_steps() -> u32 {
    DEFAULT_SUB_STEPS
}

impl Scenario {
    /// Creates a scenario with empty params, speed `1.0`, and the default
    /// sub-step count.
    pub fn new(shape: &str, frames: usize) -> Self {
        Self {
            shape: shape.to_string(),
            params: empty_params(),
            speed: default_speed(),
            sub_steps: DEFAULT_SUB_STEPS,
            frames,
        }
    }

    /// Parses a scenario from JSON text and validates it.
    pub fn from_json_str(text: &str) -> Result<Self, CurveError> {
        let scenario: Scenario = serde_json::from_str(text)
            .map_err(|e| CurveError::InvalidScenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads a scenario file and validates it.
    ///
    /// Returns `CurveError::Io` if the file cannot be read and
    /// `CurveError::InvalidScenario` if its contents are not a valid run.
    pub fn from_file(path: &Path) -> Result<Self, CurveError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CurveError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Checks that the run is well formed: at least one frame, a positive
    /// finite speed, and a params object.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.frames == 0 {
            return Err(CurveError::InvalidScenario(
                "frames must be positive".into(),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(CurveError::InvalidScenario(format!(
                "speed must be positive and finite, got {}",
                self.speed
            )));
        }
        if !self.params.is_object() {
            return Err(CurveError::InvalidScenario(
                "params must be a JSON object".into(),
            ));
        }
        Ok(())
    }
}
