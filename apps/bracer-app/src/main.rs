//! Bracer forearm simulator CLI.
//!
//! Provides four modes of operation:
//! - `ik`: Solve inverse kinematics for a target point and print the pose
//! - `simulate`: Run the closed-loop PID joint simulation
//! - `actuate`: Optimize muscle pressure and contraction for a target angle
//! - `trajectory`: Sweep a circular path and export the joint profile as CSV

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use bracer_actuation::{optimize_actuation, McKibbenMuscle, OptimizerConfig};
use bracer_control::JointSimulation;
use bracer_core::prelude::*;
use bracer_kinematics::{ArmPose, JointAngles, PlanarArm};
use bracer_profile::{circular_trajectory, CSV_HEADER};
use bracer_session::ArmSession;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Two-link planar forearm simulator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve inverse kinematics for a workspace target.
    Ik {
        /// Target x coordinate (m).
        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        /// Target y coordinate (m).
        #[arg(short, long, allow_hyphen_values = true)]
        y: f64,

        /// Upper link length (m); overrides the configured value.
        #[arg(long)]
        l1: Option<f64>,

        /// Forearm link length (m); overrides the configured value.
        #[arg(long)]
        l2: Option<f64>,
    },

    /// Run the closed-loop PID joint simulation.
    Simulate {
        /// Target joint position (rad).
        #[arg(short, long, allow_hyphen_values = true)]
        setpoint: f64,

        /// Simulated duration (s).
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        /// Controller timestep (s); overrides the configured value.
        #[arg(long)]
        dt: Option<f64>,
    },

    /// Find the muscle pressure and contraction for a target elbow angle.
    Actuate {
        /// Target elbow angle (rad).
        #[arg(short, long, allow_hyphen_values = true)]
        target: f64,

        /// Initial pressure guess (bar).
        #[arg(short, long, default_value_t = 1.0)]
        pressure: f64,

        /// Initial contraction-ratio guess.
        #[arg(long, default_value_t = 0.5)]
        contraction: f64,
    },

    /// Sweep a circular path through IK and emit the joint-angle profile.
    Trajectory {
        /// Circle radius (m).
        #[arg(short, long)]
        radius: f64,

        /// Number of waypoints.
        #[arg(short, long, default_value_t = 100)]
        steps: usize,

        /// Write the profile CSV here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

/// Solve a bare IK query: no session, no elbow limit. Any target inside the
/// reachable annulus succeeds; the only failure is an unreachable target.
fn solve_target(
    config: &ArmConfig,
    x: f64,
    y: f64,
    l1: Option<f64>,
    l2: Option<f64>,
) -> Result<(JointAngles, ArmPose), BracerError> {
    let arm = PlanarArm::new(l1.unwrap_or(config.l1), l2.unwrap_or(config.l2))?;
    let angles = arm.inverse(x, y)?;
    Ok((angles, arm.forward(angles)))
}

fn run_ik(
    config: &ForearmConfig,
    x: f64,
    y: f64,
    l1: Option<f64>,
    l2: Option<f64>,
) -> Result<(), BracerError> {
    let (angles, pose) = solve_target(&config.arm, x, y, l1, l2)?;

    println!(
        "Joint Angles (rad): theta1={:.2}, theta2={:.2}",
        angles.theta1, angles.theta2
    );
    println!("elbow:        ({:.4}, {:.4})", pose.elbow[0], pose.elbow[1]);
    println!(
        "end effector: ({:.4}, {:.4})",
        pose.end_effector[0], pose.end_effector[1]
    );
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn run_simulate(
    config: &ForearmConfig,
    setpoint: f64,
    duration: f64,
    dt: Option<f64>,
) -> Result<(), BracerError> {
    let mut pid = config.pid.clone();
    if let Some(dt) = dt {
        pid.dt = dt;
    }
    pid.validate()?;

    let mut sim = JointSimulation::new(&pid);
    let trace = sim.run(setpoint, duration);
    info!(ticks = trace.len(), "simulation complete");

    // One line per simulated second plus the final tick.
    let per_second = (1.0 / pid.dt).round() as usize;
    for (i, sample) in trace.iter().enumerate() {
        if per_second > 0 && (i + 1) % per_second == 0 {
            println!("t={:8.3}s  position={:+.6} rad", sample.time, sample.position);
        }
    }
    if let Some(last) = trace.last() {
        println!(
            "final: position={:+.6} rad, error={:+.6} rad",
            last.position,
            setpoint - last.position
        );
    }
    Ok(())
}

fn run_actuate(target: f64, pressure: f64, contraction: f64) {
    let solution = optimize_actuation(target, (pressure, contraction), &OptimizerConfig::default());

    println!("pressure:    {:.4} bar", solution.pressure);
    println!("contraction: {:.4}", solution.contraction);
    println!(
        "force:       {:.4} N",
        McKibbenMuscle::new(100.0, 0.3).force(solution.pressure, solution.contraction)
    );
    println!(
        "cost={:.3e}, iterations={}, converged={}",
        solution.cost, solution.iterations, solution.converged
    );
}

fn run_trajectory(
    config: &ForearmConfig,
    radius: f64,
    steps: usize,
    out: Option<&PathBuf>,
) -> Result<(), BracerError> {
    let mut session = ArmSession::new(&config.arm)?;
    for (x, y) in circular_trajectory(radius, steps) {
        session.solve_ik(x, y)?;
        session.capture_step();
    }

    match out {
        Some(path) => {
            session.export_capture(path)?;
            println!("wrote {} steps to {}", session.capture().len(), path.display());
        }
        None => {
            println!("{CSV_HEADER}");
            for angles in session.capture().iter() {
                println!("{},{}", angles.theta1, angles.theta2);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn load_config(path: Option<&PathBuf>) -> Result<ForearmConfig, BracerError> {
    match path {
        Some(path) => Ok(ForearmConfig::from_file(path)?),
        None => Ok(ForearmConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), BracerError> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Ik { x, y, l1, l2 } => run_ik(&config, x, y, l1, l2),
        Commands::Simulate {
            setpoint,
            duration,
            dt,
        } => run_simulate(&config, setpoint, duration, dt),
        Commands::Actuate {
            target,
            pressure,
            contraction,
        } => {
            run_actuate(target, pressure, contraction);
            Ok(())
        }
        Commands::Trajectory { radius, steps, out } => {
            run_trajectory(&config, radius, steps, out.as_ref())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
