#![deny(unsafe_code)]
//! Core types and traits for curve-flow, a discrete curve-shortening flow engine.
//!
//! Provides the stateless geometry primitives (`distance`, `unit_vector`,
//! `circumradius`), cyclic index helpers, the `Curve` polygon with shoelace
//! area, the `Engine` trait, the `CurveError` type, JSON parameter helpers,
//! and the serializable `Scenario`.

pub mod curve;
pub mod cyclic;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod params;
pub mod scenario;

pub use curve::{adaptive_graininess, enclosed_area, normalized_area, Curve, ReferenceCanvas};
pub use engine::Engine;
pub use error::CurveError;
pub use geometry::{circumradius, distance, midpoint, unit_vector, Point, Vector2};
pub use scenario::Scenario;
