#![deny(unsafe_code)]
//! CLI binary for curve-flow.
//!
//! Subcommands:
//! - `run <shape>`: evolve a shape under curve-shortening flow for N frames
//!   and report area, vertex count, and curvature
//! - `list`: print available shapes

mod error;

use clap::{Parser, Subcommand};
use curve_flow_core::scenario::DEFAULT_SUB_STEPS;
use curve_flow_core::{CurveError, Engine, Scenario};
use curve_flow_shapes::ShapeKind;
use curve_flow_shortening::{FlowOptions, FlowParams, FlowSession, FrameReport};
use error::CliError;
use log::info;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "curve-flow", about = "Discrete curve-shortening flow")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evolve a shape for N frames and report how it shrinks.
    Run {
        /// Shape name (e.g. "circle"). Required unless --scenario is given.
        shape: Option<String>,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 500)]
        frames: usize,

        /// Speed control; step size per frame is speed * graininess / 10.
        #[arg(short, long, default_value_t = 1.0)]
        speed: f64,

        /// Integrator sub-steps per frame.
        #[arg(long, default_value_t = DEFAULT_SUB_STEPS)]
        sub_steps: u32,

        /// Shape parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Read shape, params, speed, sub-steps, and frames from a JSON file.
        #[arg(long, conflicts_with = "shape")]
        scenario: Option<PathBuf>,

        /// Paused frames to run before evolving; they only resample.
        #[arg(long, default_value_t = 0)]
        hold: usize,

        /// Let displacement grow without bound near collapse.
        #[arg(long)]
        no_clamp: bool,

        /// Report every frame, not just the summary.
        #[arg(long)]
        trace: bool,
    },
    /// List available shapes.
    List,
}

/// How a run ended.
struct RunSummary {
    shape: String,
    initial_vertices: usize,
    initial_area: f64,
    last: Option<FrameReport>,
    collapsed_at: Option<usize>,
    trace: Vec<FrameReport>,
}

fn report_json(report: &FrameReport) -> Value {
    json!({
        "frame": report.frame,
        "vertices": report.vertices,
        "inserted": report.inserted,
        "removed": report.removed,
        "area": report.area,
        "graininess": report.graininess,
        "perimeter": report.perimeter,
        "max_curvature": report.max_curvature,
        "paused": report.paused,
    })
}

fn report_line(report: &FrameReport) -> String {
    format!(
        "frame {:>5}{} vertices {:>5}  area {:>9.5}  perimeter {:>9.2}  graininess {:>7.3}  max curvature {:.5}",
        report.frame,
        if report.paused { "*" } else { " " },
        report.vertices,
        report.area,
        report.perimeter,
        report.graininess,
        report.max_curvature
    )
}

fn load_scenario(
    path: Option<PathBuf>,
    shape: Option<String>,
    frames: usize,
    speed: f64,
    sub_steps: u32,
    params: &str,
) -> Result<Scenario, CliError> {
    if let Some(path) = path {
        return Ok(Scenario::from_file(&path)?);
    }

    let shape = shape.ok_or_else(|| CliError::Input("missing shape name".into()))?;
    let mut scenario = Scenario::new(&shape, frames);
    scenario.params = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    scenario.speed = speed;
    scenario.sub_steps = sub_steps;
    scenario.validate()?;
    Ok(scenario)
}

fn run_scenario(
    scenario: &Scenario,
    hold: usize,
    clamp: bool,
    trace: bool,
) -> Result<RunSummary, CliError> {
    let shape = ShapeKind::from_name(&scenario.shape, &scenario.params)?;
    let params = FlowParams {
        speed: scenario.speed,
        sub_steps: scenario.sub_steps,
        options: FlowOptions {
            clamp_to_chord: clamp,
        },
        ..FlowParams::default()
    };
    let mut session = FlowSession::new(shape.curve().into_points(), params);
    let inserted = session.start();
    info!(
        "{}: {} vertices after initial densify (+{inserted})",
        scenario.shape,
        session.curve().len()
    );

    let mut summary = RunSummary {
        shape: scenario.shape.clone(),
        initial_vertices: session.curve().len(),
        initial_area: session.area(),
        last: None,
        collapsed_at: None,
        trace: Vec::new(),
    };

    if hold > 0 {
        session.pause();
    }
    for i in 0..hold + scenario.frames {
        if i == hold {
            session.resume();
        }
        match session.frame() {
            Ok(report) => {
                if trace {
                    summary.trace.push(report);
                }
                if !report.paused {
                    summary.last = Some(report);
                }
            }
            Err(CurveError::DegenerateCurve { .. }) => {
                summary.collapsed_at = Some(session.frames() + 1);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(summary)
}

fn print_summary(summary: &RunSummary, json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        let mut info = json!({
            "shape": summary.shape,
            "initial_vertices": summary.initial_vertices,
            "initial_area": summary.initial_area,
            "frames_completed": summary.last.map_or(0, |r| r.frame),
            "collapsed_at": summary.collapsed_at,
            "last": summary.last.as_ref().map(report_json),
        });
        if !summary.trace.is_empty() {
            info["trace"] = summary.trace.iter().map(report_json).collect::<Value>();
        }
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    for report in &summary.trace {
        println!("{}", report_line(report));
    }
    let frames = summary.last.map_or(0, |r| r.frame);
    match (summary.collapsed_at, summary.last) {
        (Some(frame), _) => eprintln!(
            "{}: collapsed at frame {frame} (initial area {:.5}, {} vertices)",
            summary.shape, summary.initial_area, summary.initial_vertices
        ),
        (None, Some(last)) => eprintln!(
            "{}: {frames} frames, area {:.5} -> {:.5}, {} -> {} vertices",
            summary.shape, summary.initial_area, last.area, summary.initial_vertices, last.vertices
        ),
        (None, None) => eprintln!("{}: no frames run", summary.shape),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let shapes = ShapeKind::list_shapes();
            if cli.json {
                let info = json!({ "shapes": shapes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Shapes:");
                for name in shapes {
                    println!("  {name}");
                }
            }
        }
        Command::Run {
            shape,
            frames,
            speed,
            sub_steps,
            params,
            scenario,
            hold,
            no_clamp,
            trace,
        } => {
            let scenario = load_scenario(scenario, shape, frames, speed, sub_steps, &params)?;
            let summary = run_scenario(&scenario, hold, !no_clamp, trace)?;
            print_summary(&summary, cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
