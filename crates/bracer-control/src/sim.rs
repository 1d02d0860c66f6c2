//! Closed-loop joint motion simulation.
//!
//! A PID controller drives a damped second-order plant: the control signal
//! acts as torque, velocity integrates acceleration, position integrates
//! velocity, all at the controller's fixed step. The simulation produces a
//! plain sample trace; plotting is an external concern.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use bracer_core::config::PidConfig;
use bracer_core::time::SimTime;

use crate::pid::PidController;

/// Velocity damping coefficient of the default plant.
const DEFAULT_DAMPING: f64 = 0.1;

// ---------------------------------------------------------------------------
// MotionSample
// ---------------------------------------------------------------------------

/// One simulation tick: elapsed time and joint position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Elapsed time (seconds).
    pub time: f64,
    /// Joint position (rad).
    pub position: f64,
}

// ---------------------------------------------------------------------------
// JointSimulation
// ---------------------------------------------------------------------------

/// Single-joint closed-loop simulation.
///
/// Plant model per step: `accel = u - damping * velocity`, then Euler
/// integration of velocity and position at the controller's `dt`.
#[derive(Debug, Clone)]
pub struct JointSimulation {
    controller: PidController,
    damping: f64,
    position: f64,
    velocity: f64,
    clock: SimTime,
    step: Duration,
}

impl JointSimulation {
    /// Create a simulation from PID gains, starting at rest at zero.
    #[must_use]
    pub fn new(config: &PidConfig) -> Self {
        Self {
            controller: PidController::from_config(config),
            damping: DEFAULT_DAMPING,
            position: 0.0,
            velocity: 0.0,
            clock: SimTime::new(),
            step: Duration::from_secs_f64(config.dt),
        }
    }

    /// Override the plant damping coefficient.
    #[must_use]
    pub const fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Current joint position (rad).
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Current joint velocity (rad/s).
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Elapsed simulation time.
    #[must_use]
    pub const fn clock(&self) -> SimTime {
        self.clock
    }

    /// Advance one control tick toward `setpoint`.
    pub fn step(&mut self, setpoint: f64) -> MotionSample {
        let dt = self.controller.dt();
        let torque = self.controller.compute(setpoint, self.position);

        let accel = torque - self.damping * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.clock.advance(self.step);

        MotionSample {
            time: self.clock.as_secs_f64(),
            position: self.position,
        }
    }

    /// Run for `duration` seconds and collect the position trace.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn run(&mut self, setpoint: f64, duration: f64) -> Vec<MotionSample> {
        let steps = (duration / self.controller.dt()).floor() as usize;
        (0..steps).map(|_| self.step(setpoint)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
