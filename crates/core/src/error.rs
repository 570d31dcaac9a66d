//! Error types for the curve-flow core.
//!
//! Numerical edge cases (zero-length bias vectors, collinear triples) are
//! handled with sentinel values inside the engine and never surface here.
//! Only conditions the caller must act on are errors.

use thiserror::Error;

/// Errors produced by curve operations.
#[derive(Debug, Error)]
pub enum CurveError {
    /// The polygon has (or would be reduced to) fewer than three vertices.
    ///
    /// The caller should stop evolving and discard the curve.
    #[error("degenerate curve: {vertices} vertices, at least 3 required")]
    DegenerateCurve { vertices: usize },

    /// A requested shape name is not in the registry.
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    /// A parameter was present but its value cannot be used.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A scenario description failed validation.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// Reading or writing an external file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
