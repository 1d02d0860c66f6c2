//! Errors, configuration, and the simulation clock shared across the bracer
//! workspace.

pub mod config;
pub mod error;
pub mod time;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{ArmConfig, ForearmConfig, PidConfig};
    pub use crate::error::{BracerError, ConfigError, KinematicsError, ProfileError};
    pub use crate::time::SimTime;
}
