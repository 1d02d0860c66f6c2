use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_link_length() -> f64 {
    1.0
}
const fn default_max_elbow_angle_deg() -> f64 {
    150.0
}
const fn default_kp() -> f64 {
    10.0
}
const fn default_ki() -> f64 {
    1.0
}
const fn default_kd() -> f64 {
    0.5
}
const fn default_dt() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// ArmConfig
// ---------------------------------------------------------------------------

/// Geometry and joint limits of the two-link arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Upper link length in meters (default: 1.0).
    #[serde(default = "default_link_length")]
    pub l1: f64,

    /// Forearm link length in meters (default: 1.0).
    #[serde(default = "default_link_length")]
    pub l2: f64,

    /// Maximum allowed elbow angle magnitude in degrees (default: 150).
    /// Compared in radians when a solution is accepted.
    #[serde(default = "default_max_elbow_angle_deg")]
    pub max_elbow_angle_deg: f64,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            l1: default_link_length(),
            l2: default_link_length(),
            max_elbow_angle_deg: default_max_elbow_angle_deg(),
        }
    }
}

impl ArmConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.l1 <= 0.0 || !self.l1.is_finite() {
            return Err(ConfigError::InvalidLinkLength(self.l1));
        }
        if self.l2 <= 0.0 || !self.l2.is_finite() {
            return Err(ConfigError::InvalidLinkLength(self.l2));
        }
        if self.max_elbow_angle_deg <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_elbow_angle_deg".into(),
                message: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Maximum elbow angle in radians.
    pub fn max_elbow_angle_rad(&self) -> f64 {
        self.max_elbow_angle_deg.to_radians()
    }
}

// ---------------------------------------------------------------------------
// PidConfig
// ---------------------------------------------------------------------------

/// Gains and cadence for the PID joint controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    #[serde(default = "default_kp")]
    pub kp: f64,

    /// Integral gain.
    #[serde(default = "default_ki")]
    pub ki: f64,

    /// Derivative gain.
    #[serde(default = "default_kd")]
    pub kd: f64,

    /// Fixed step interval in seconds (default: 0.01). The controller must
    /// be invoked at this cadence for the integral/derivative terms to be
    /// physically meaningful.
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Optional integral clamp for the hardened variant. `None` keeps the
    /// original unbounded accumulator.
    #[serde(default)]
    pub integral_limit: Option<f64>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: default_kp(),
            ki: default_ki(),
            kd: default_kd(),
            dt: default_dt(),
            integral_limit: None,
        }
    }
}

impl PidConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }
        if let Some(limit) = self.integral_limit {
            if limit <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "integral_limit".into(),
                    message: "must be positive".into(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ForearmConfig
// ---------------------------------------------------------------------------

/// Complete simulator configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForearmConfig {
    #[serde(default)]
    pub arm: ArmConfig,
    #[serde(default)]
    pub pid: PidConfig,
}

impl ForearmConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arm.validate()?;
        self.pid.validate()
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
