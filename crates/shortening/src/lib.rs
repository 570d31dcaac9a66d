#![deny(unsafe_code)]
//! Discrete curve-shortening flow.
//!
//! Moves each vertex of a closed polygon along its estimated inward normal at
//! a rate proportional to the local curvature, approximating the smoothing
//! and shrinking behaviour of the continuous curve-shortening equation.
//! Adaptive resampling keeps vertex spacing inside a band set by the
//! graininess, which in turn follows the enclosed area.
//!
//! - [`resample`]: `densify` and `decimate`, independent passes.
//! - [`flow`]: `evolve`, the Jacobi-style curvature integrator.
//! - [`session`]: `FlowSession`, the per-frame policy as an [`Engine`].

pub mod flow;
pub mod resample;
pub mod session;

pub use curve_flow_core::Engine;
pub use flow::{evolve, evolve_with, FlowOptions, FlowOutcome, VELOCITY_SCALE};
pub use resample::{decimate, densify};
pub use session::{FlowParams, FlowSession, FrameReport};
