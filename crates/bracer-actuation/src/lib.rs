//! Soft-actuator modeling for the bracer forearm.
//!
//! [`muscle`] provides the simplified McKibben force law; [`optimizer`] wraps
//! it in a bounded cost minimization that trades target-angle error against
//! actuation effort. The optimizer is implemented in-house (no external
//! solver crate dependency) for minimal footprint and full control over the
//! implementation.

pub mod muscle;
pub mod optimizer;

pub use muscle::McKibbenMuscle;
pub use optimizer::{optimize_actuation, ActuationSolution, OptimizerConfig};
