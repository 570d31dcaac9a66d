//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success (including a curve that collapsed before the last frame)
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: engine error (unknown shape, bad shape parameters)
//! - 11: I/O error (reading a scenario file)
//! - 12: input error (bad JSON params, invalid scenario)
//! - 13: serialization error

use curve_flow_core::CurveError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// An engine-level error (unknown shape, bad shape parameters).
    Engine(CurveError),
    /// An I/O error (scenario file read).
    Io(String),
    /// A user input error (bad JSON params, invalid scenario).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<CurveError> for CliError {
    fn from(e: CurveError) -> Self {
        match e {
            CurveError::Io(msg) => CliError::Io(msg),
            CurveError::InvalidScenario(msg) => CliError::Input(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
