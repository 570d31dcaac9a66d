#![deny(unsafe_code)]
//! Shape registry: maps shape names to closed-form curve generators.
//!
//! The flow engine only ever sees a point list. This crate supplies those
//! lists for headless runs and tests, standing in for a hand-drawn outline.

pub mod blob;
pub mod parametric;

use blob::Blob;
use curve_flow_core::curve::Curve;
use curve_flow_core::error::CurveError;
use parametric::{Circle, Ellipse, Epicycloid, Lemniscate, Square};
use serde_json::Value;

/// All available shape names.
const SHAPE_NAMES: &[&str] = &[
    "circle",
    "square",
    "ellipse",
    "epicycloid",
    "lemniscate",
    "blob",
];

/// Enumeration of all available starting shapes.
///
/// Use [`ShapeKind::from_name`] for string-based construction (CLI,
/// scenarios).
pub enum ShapeKind {
    Circle(Circle),
    Square(Square),
    Ellipse(Ellipse),
    Epicycloid(Epicycloid),
    Lemniscate(Lemniscate),
    Blob(Blob),
}

impl ShapeKind {
    /// Constructs a shape by name from a JSON params object.
    ///
    /// Returns `CurveError::UnknownShape` if the name is not recognized and
    /// `CurveError::InvalidParam` if a parameter is out of range.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, CurveError> {
        match name {
            "circle" => Ok(ShapeKind::Circle(Circle::from_json(params)?)),
            "square" => Ok(ShapeKind::Square(Square::from_json(params)?)),
            "ellipse" => Ok(ShapeKind::Ellipse(Ellipse::from_json(params)?)),
            "epicycloid" => Ok(ShapeKind::Epicycloid(Epicycloid::from_json(params)?)),
            "lemniscate" => Ok(ShapeKind::Lemniscate(Lemniscate::from_json(params)?)),
            "blob" => Ok(ShapeKind::Blob(Blob::from_json(params)?)),
            _ => Err(CurveError::UnknownShape(name.to_string())),
        }
    }

    /// Returns a slice of all recognized shape names.
    pub fn list_shapes() -> &'static [&'static str] {
        SHAPE_NAMES
    }

    /// Samples the shape into a closed polygon.
    pub fn curve(&self) -> Curve {
        let points = match self {
            ShapeKind::Circle(s) => s.points(),
            ShapeKind::Square(s) => s.points(),
            ShapeKind::Ellipse(s) => s.points(),
            ShapeKind::Epicycloid(s) => s.points(),
            ShapeKind::Lemniscate(s) => s.points(),
            ShapeKind::Blob(s) => s.points(),
        };
        Curve::new(points)
    }
}
