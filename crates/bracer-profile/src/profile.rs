//! In-memory motion profile.

use serde::{Deserialize, Serialize};

use bracer_core::error::ProfileError;
use bracer_kinematics::JointAngles;

// ---------------------------------------------------------------------------
// MotionProfile
// ---------------------------------------------------------------------------

/// An ordered sequence of joint-angle steps.
///
/// Append-only while capturing; loaded profiles additionally support in-place
/// editing and deletion by step index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionProfile {
    steps: Vec<JointAngles>,
}

impl MotionProfile {
    /// Create an empty profile.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Build a profile from existing steps.
    #[must_use]
    pub fn from_steps(steps: Vec<JointAngles>) -> Self {
        Self { steps }
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the profile has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step.
    pub fn push(&mut self, angles: JointAngles) {
        self.steps.push(angles);
    }

    /// Step at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<JointAngles> {
        self.steps.get(index).copied()
    }

    /// Replace the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::IndexOutOfRange`] for an invalid index.
    pub fn set(&mut self, index: usize, angles: JointAngles) -> Result<(), ProfileError> {
        let len = self.len();
        match self.steps.get_mut(index) {
            Some(step) => {
                *step = angles;
                Ok(())
            }
            None => Err(ProfileError::IndexOutOfRange { index, len }),
        }
    }

    /// Delete the step at `index`, shifting later steps down.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::IndexOutOfRange`] for an invalid index.
    pub fn remove(&mut self, index: usize) -> Result<JointAngles, ProfileError> {
        if index >= self.len() {
            return Err(ProfileError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.steps.remove(index))
    }

    /// Drop all steps.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Steps in order.
    #[must_use]
    pub fn steps(&self) -> &[JointAngles] {
        &self.steps
    }

    /// Iterate over steps in order.
    pub fn iter(&self) -> impl Iterator<Item = &JointAngles> {
        self.steps.iter()
    }
}

impl FromIterator<JointAngles> for MotionProfile {
    fn from_iter<I: IntoIterator<Item = JointAngles>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
