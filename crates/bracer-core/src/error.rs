use thiserror::Error;

/// Top-level error type for the bracer workspace.
#[derive(Debug, Error)]
pub enum BracerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid link length: {0} (must be > 0)")]
    InvalidLinkLength(f64),

    #[error("Invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f64),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Kinematics errors.
///
/// Copy + inline payloads for cheap propagation from the solver hot path.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KinematicsError {
    #[error("Target ({x}, {y}) is outside the reachable workspace")]
    UnreachableTarget { x: f64, y: f64 },

    #[error("Elbow angle {angle_rad} rad exceeds limit {limit_rad} rad")]
    ElbowLimitExceeded { angle_rad: f64, limit_rad: f64 },
}

/// Motion profile load/store errors.
///
/// Any failure here aborts the whole operation; the in-memory profile is
/// never partially updated.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header: expected {expected:?}, got {got:?}")]
    InvalidHeader { expected: &'static str, got: String },

    #[error("Row {line} has {got} fields, expected 2")]
    WrongFieldCount { line: usize, got: usize },

    #[error("Invalid numeric value at line {line}: {text:?}")]
    InvalidField { line: usize, text: String },

    #[error("Step index {index} out of range (profile has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },
}
