//! Closed-loop joint control for the bracer forearm.
//!
//! Controllers are implemented in-house (no external `pid` crate dependency)
//! for minimal footprint and full control over the implementation.
//!
//! # Control Pipeline
//!
//! ```text
//! setpoint ──► PidController ──► torque ──► damped plant ──► MotionSample
//!              (fixed dt)                   (Euler step)
//! ```

pub mod pid;
pub mod sim;

pub use pid::PidController;
pub use sim::{JointSimulation, MotionSample};
