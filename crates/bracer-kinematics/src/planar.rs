//! Closed-form kinematics for the 2-link planar arm.
//!
//! The inverse solver returns the elbow-up branch only (non-negative
//! `sin(theta2)`); elbow-down is never produced. Targets outside the
//! reachable annulus fail with [`KinematicsError::UnreachableTarget`] and are
//! never clamped to the boundary.

use serde::{Deserialize, Serialize};

use bracer_core::error::{ConfigError, KinematicsError};

// ---------------------------------------------------------------------------
// JointAngles
// ---------------------------------------------------------------------------

/// Shoulder and elbow joint angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    /// Shoulder angle `theta1` (rad).
    pub theta1: f64,
    /// Elbow angle `theta2` (rad).
    pub theta2: f64,
}

impl JointAngles {
    /// Create a joint-angle pair.
    #[must_use]
    pub const fn new(theta1: f64, theta2: f64) -> Self {
        Self { theta1, theta2 }
    }
}

// ---------------------------------------------------------------------------
// ArmPose
// ---------------------------------------------------------------------------

/// Joint positions of the arm in its plane.
///
/// This is the data an external plotter consumes: the shoulder is pinned at
/// the origin, the remaining points follow from the joint angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmPose {
    /// Elbow position `(x, y)` in meters.
    pub elbow: [f64; 2],
    /// End-effector position `(x, y)` in meters.
    pub end_effector: [f64; 2],
}

// ---------------------------------------------------------------------------
// PlanarArm
// ---------------------------------------------------------------------------

/// A 2-link planar arm with fixed link lengths.
///
/// Immutable per session; both forward and inverse kinematics are pure
/// functions of the stored geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarArm {
    l1: f64,
    l2: f64,
}

impl PlanarArm {
    /// Create an arm with the given link lengths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLinkLength`] unless both lengths are
    /// finite and positive.
    pub fn new(l1: f64, l2: f64) -> Result<Self, ConfigError> {
        if l1 <= 0.0 || !l1.is_finite() {
            return Err(ConfigError::InvalidLinkLength(l1));
        }
        if l2 <= 0.0 || !l2.is_finite() {
            return Err(ConfigError::InvalidLinkLength(l2));
        }
        Ok(Self { l1, l2 })
    }

    /// Upper link length (m).
    #[must_use]
    pub const fn l1(&self) -> f64 {
        self.l1
    }

    /// Forearm link length (m).
    #[must_use]
    pub const fn l2(&self) -> f64 {
        self.l2
    }

    /// Inner and outer radius of the reachable annulus.
    #[must_use]
    pub fn reach(&self) -> (f64, f64) {
        ((self.l1 - self.l2).abs(), self.l1 + self.l2)
    }

    /// Forward kinematics: joint angles to elbow and end-effector positions.
    #[must_use]
    pub fn forward(&self, angles: JointAngles) -> ArmPose {
        let (s1, c1) = angles.theta1.sin_cos();
        let (s12, c12) = (angles.theta1 + angles.theta2).sin_cos();

        let elbow = [self.l1 * c1, self.l1 * s1];
        let end_effector = [elbow[0] + self.l2 * c12, elbow[1] + self.l2 * s12];
        ArmPose {
            elbow,
            end_effector,
        }
    }

    /// Inverse kinematics for a target end-effector position, elbow-up branch.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::UnreachableTarget`] when the target lies
    /// outside the reachable annulus (`|cos(theta2)| > 1`). The cosine is
    /// never clamped: boundary targets solve exactly (theta2 = 0 or pi),
    /// anything beyond fails.
    pub fn inverse(&self, x: f64, y: f64) -> Result<JointAngles, KinematicsError> {
        let cos_theta2 =
            (x * x + y * y - self.l1 * self.l1 - self.l2 * self.l2) / (2.0 * self.l1 * self.l2);
        if cos_theta2.abs() > 1.0 {
            return Err(KinematicsError::UnreachableTarget { x, y });
        }

        // Elbow-up branch: sin(theta2) >= 0.
        let sin_theta2 = (1.0 - cos_theta2 * cos_theta2).sqrt();
        let theta2 = sin_theta2.atan2(cos_theta2);

        let k1 = self.l1 + self.l2 * cos_theta2;
        let k2 = self.l2 * sin_theta2;
        let theta1 = y.atan2(x) - k2.atan2(k1);

        Ok(JointAngles::new(theta1, theta2))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
