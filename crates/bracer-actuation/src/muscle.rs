//! Simplified McKibben pneumatic muscle force model.

use serde::{Deserialize, Serialize};

/// Effective cross-sectional area of the muscle bladder (cm^2).
pub const EFFECTIVE_AREA: f64 = 0.785;

// ---------------------------------------------------------------------------
// McKibbenMuscle
// ---------------------------------------------------------------------------

/// A pneumatic soft actuator with a linear force law.
///
/// `force = pressure * EFFECTIVE_AREA * (1 - contraction_ratio)`.
///
/// Inputs are not validated: negative pressure or a contraction ratio outside
/// `[0, 1]` silently produce a value. Bounding the domain is the caller's
/// responsibility; in practice the actuation optimizer constrains both
/// decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McKibbenMuscle {
    max_force: f64,
    rest_length: f64,
}

impl McKibbenMuscle {
    /// Create a muscle with the given rated force (N) and rest length (m).
    #[must_use]
    pub const fn new(max_force: f64, rest_length: f64) -> Self {
        Self {
            max_force,
            rest_length,
        }
    }

    /// Rated maximum force (N).
    #[must_use]
    pub const fn max_force(&self) -> f64 {
        self.max_force
    }

    /// Rest length (m).
    #[must_use]
    pub const fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Force estimate for a pressure (bar) and contraction ratio.
    ///
    /// Contraction reduces the usable force linearly; at full contraction the
    /// muscle produces nothing.
    #[must_use]
    pub fn force(&self, pressure: f64, contraction_ratio: f64) -> f64 {
        pressure * EFFECTIVE_AREA * (1.0 - contraction_ratio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
