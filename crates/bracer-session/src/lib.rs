//! Explicit application state for a forearm session.
//!
//! [`ArmSession`] owns everything a front end needs: the arm geometry, the
//! elbow-angle limit, the current joint state, and the captured/loaded motion
//! profiles. Presentation layers call in with plain numbers and get plain
//! numbers or errors back; no UI state lives here.

use std::path::Path;

use tracing::warn;

use bracer_core::config::ArmConfig;
use bracer_core::error::{ConfigError, KinematicsError, ProfileError};
use bracer_kinematics::{ArmPose, JointAngles, PlanarArm};
use bracer_profile::{read_profile, write_profile, MotionProfile};

// ---------------------------------------------------------------------------
// ArmSession
// ---------------------------------------------------------------------------

/// Session state for one simulated forearm.
#[derive(Debug, Clone)]
pub struct ArmSession {
    arm: PlanarArm,
    max_elbow_angle_rad: f64,
    joints: JointAngles,
    capture: MotionProfile,
    loaded: MotionProfile,
}

impl ArmSession {
    /// Create a session from a validated [`ArmConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the geometry or elbow limit is invalid.
    pub fn new(config: &ArmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arm: PlanarArm::new(config.l1, config.l2)?,
            max_elbow_angle_rad: config.max_elbow_angle_rad(),
            joints: JointAngles::default(),
            capture: MotionProfile::new(),
            loaded: MotionProfile::new(),
        })
    }

    /// The session's arm geometry.
    #[must_use]
    pub const fn arm(&self) -> &PlanarArm {
        &self.arm
    }

    /// Current joint angles.
    #[must_use]
    pub const fn joints(&self) -> JointAngles {
        self.joints
    }

    /// Pose of the arm at the current joint angles.
    #[must_use]
    pub fn pose(&self) -> ArmPose {
        self.arm.forward(self.joints)
    }

    /// Solve IK for a target and adopt the solution as the current state.
    ///
    /// The solution is checked against the elbow limit before it is
    /// accepted; a rejected solution leaves the current state unchanged.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::UnreachableTarget`] from the solver, or
    /// [`KinematicsError::ElbowLimitExceeded`] from the acceptance check.
    pub fn solve_ik(&mut self, x: f64, y: f64) -> Result<JointAngles, KinematicsError> {
        let angles = self.arm.inverse(x, y)?;
        self.accept(angles)?;
        Ok(angles)
    }

    /// Set joint angles directly (manual control path).
    ///
    /// # Errors
    ///
    /// [`KinematicsError::ElbowLimitExceeded`] when `theta2` violates the
    /// elbow limit; the current state is left unchanged.
    pub fn set_joints(&mut self, angles: JointAngles) -> Result<(), KinematicsError> {
        self.accept(angles)
    }

    fn accept(&mut self, angles: JointAngles) -> Result<(), KinematicsError> {
        if angles.theta2.abs() > self.max_elbow_angle_rad {
            warn!(
                theta2 = angles.theta2,
                limit = self.max_elbow_angle_rad,
                "rejecting solution: elbow limit exceeded"
            );
            return Err(KinematicsError::ElbowLimitExceeded {
                angle_rad: angles.theta2,
                limit_rad: self.max_elbow_angle_rad,
            });
        }
        self.joints = angles;
        Ok(())
    }

    /// Append the current joint angles to the capture profile.
    pub fn capture_step(&mut self) {
        self.capture.push(self.joints);
    }

    /// Steps captured so far.
    #[must_use]
    pub const fn capture(&self) -> &MotionProfile {
        &self.capture
    }

    /// Export the capture profile as CSV.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Io`] on write failure.
    pub fn export_capture(&self, path: impl AsRef<Path>) -> Result<(), ProfileError> {
        write_profile(path, &self.capture)
    }

    /// Load a profile CSV, replacing the loaded profile only on success.
    ///
    /// Returns the number of steps loaded.
    ///
    /// # Errors
    ///
    /// Any [`ProfileError`]; the previously loaded profile is untouched on
    /// failure.
    pub fn load_profile(&mut self, path: impl AsRef<Path>) -> Result<usize, ProfileError> {
        let profile = read_profile(path)?;
        let len = profile.len();
        self.loaded = profile;
        Ok(len)
    }

    /// The loaded profile, editable in place.
    pub fn loaded_mut(&mut self) -> &mut MotionProfile {
        &mut self.loaded
    }

    /// The loaded profile.
    #[must_use]
    pub const fn loaded(&self) -> &MotionProfile {
        &self.loaded
    }

    /// Replay the loaded profile: adopt each step in order, collecting the
    /// resulting poses. Steps violating the elbow limit fail the replay.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::ElbowLimitExceeded`] on the first offending step;
    /// the joint state keeps the last accepted step.
    pub fn replay_loaded(&mut self) -> Result<Vec<ArmPose>, KinematicsError> {
        let steps: Vec<JointAngles> = self.loaded.steps().to_vec();
        let mut poses = Vec::with_capacity(steps.len());
        for angles in steps {
            self.accept(angles)?;
            poses.push(self.pose());
        }
        Ok(poses)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn session() -> ArmSession {
        ArmSession::new(&ArmConfig::default()).unwrap()
    }

    #[test]
    fn new_session_at_rest() {
        let s = session();
        assert_eq!(s.joints(), JointAngles::default());
        assert!(s.capture().is_empty());
        assert!(s.loaded().is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = ArmConfig {
            l1: -1.0,
            ..ArmConfig::default()
        };
        assert!(ArmSession::new(&cfg).is_err());
    }

    #[test]
    fn solve_ik_updates_joints() {
        let mut s = session();
        let angles = s.solve_ik(1.0, 0.5).unwrap();
        assert_eq!(s.joints(), angles);
        let pose = s.pose();
        assert_relative_eq!(pose.end_effector[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(pose.end_effector[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn solve_ik_unreachable_keeps_state() {
        let mut s = session();
        s.solve_ik(1.0, 0.5).unwrap();
        let before = s.joints();
        assert!(matches!(
            s.solve_ik(5.0, 5.0),
            Err(KinematicsError::UnreachableTarget { .. })
        ));
        assert_eq!(s.joints(), before);
    }

    #[test]
    fn elbow_limit_rejects_folded_solutions() {
        // Limit of 90 degrees; target near the inner workspace needs a
        // sharply bent elbow and must be rejected.
        let cfg = ArmConfig {
            max_elbow_angle_deg: 90.0,
            ..ArmConfig::default()
        };
        let mut s = ArmSession::new(&cfg).unwrap();
        let err = s.solve_ik(0.3, 0.0).unwrap_err();
        assert!(matches!(err, KinematicsError::ElbowLimitExceeded { .. }));
        assert_eq!(s.joints(), JointAngles::default());
    }

    #[test]
    fn set_joints_checks_limit() {
        let mut s = session();
        // 150 degrees is the default limit
        assert!(s.set_joints(JointAngles::new(0.0, PI)).is_err());
        assert!(s.set_joints(JointAngles::new(0.0, 2.0)).is_ok());
    }

    #[test]
    fn capture_records_current_joints() {
        let mut s = session();
        s.solve_ik(1.5, 0.0).unwrap();
        s.capture_step();
        s.solve_ik(1.0, 1.0).unwrap();
        s.capture_step();
        assert_eq!(s.capture().len(), 2);
        assert_eq!(s.capture().get(1), Some(s.joints()));
    }

    #[test]
    fn export_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");

        let mut s = session();
        for &(x, y) in &[(1.5, 0.0), (1.2, 0.8), (0.9, 1.1)] {
            s.solve_ik(x, y).unwrap();
            s.capture_step();
        }
        s.export_capture(&path).unwrap();

        let loaded = s.load_profile(&path).unwrap();
        assert_eq!(loaded, 3);
        assert_eq!(s.loaded().steps(), s.capture().steps());
    }

    #[test]
    fn failed_load_keeps_previous_profile() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");

        let mut s = session();
        s.solve_ik(1.0, 0.0).unwrap();
        s.capture_step();
        s.export_capture(&good).unwrap();
        s.load_profile(&good).unwrap();

        std::fs::write(&bad, "Theta1 (rad),Theta2 (rad)\noops,0.1\n").unwrap();
        assert!(s.load_profile(&bad).is_err());
        // Previous load is still intact
        assert_eq!(s.loaded().len(), 1);
    }

    #[test]
    fn replay_produces_one_pose_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.csv");

        let mut s = session();
        for &(x, y) in &[(1.8, 0.2), (1.5, 0.9)] {
            s.solve_ik(x, y).unwrap();
            s.capture_step();
        }
        s.export_capture(&path).unwrap();
        s.load_profile(&path).unwrap();

        let poses = s.replay_loaded().unwrap();
        assert_eq!(poses.len(), 2);
        assert_relative_eq!(poses[1].end_effector[0], 1.5, epsilon = 1e-9);
        assert_relative_eq!(poses[1].end_effector[1], 0.9, epsilon = 1e-9);
    }

    #[test]
    fn loaded_profile_is_editable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edit.csv");

        let mut s = session();
        s.solve_ik(1.0, 0.0).unwrap();
        s.capture_step();
        s.export_capture(&path).unwrap();
        s.load_profile(&path).unwrap();

        s.loaded_mut().set(0, JointAngles::new(0.1, 0.2)).unwrap();
        assert_eq!(s.loaded().get(0), Some(JointAngles::new(0.1, 0.2)));
        s.loaded_mut().remove(0).unwrap();
        assert!(s.loaded().is_empty());
    }
}
