//! Single-loop PID controller with a fixed step interval.

use bracer_core::config::PidConfig;

// ---------------------------------------------------------------------------
// PidController
// ---------------------------------------------------------------------------

/// PID controller advanced once per simulation tick.
///
/// The step interval `dt` is fixed at construction, not passed per call:
/// callers must invoke [`compute`](Self::compute) at a constant cadence
/// matching `dt` for the integral and derivative terms to be physically
/// meaningful.
///
/// The integral accumulator is unbounded by default. Sustained error will
/// wind it up; [`with_integral_limit`](Self::with_integral_limit) opts into
/// clamping for a hardened variant. State is reset only by constructing a
/// new instance.
#[derive(Clone, Debug)]
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    dt: f64,
    integral_limit: Option<f64>,
    integral: f64,
    prev_error: f64,
}

impl PidController {
    /// Create a controller with the given gains and step interval.
    ///
    /// # Panics
    ///
    /// Panics unless `dt` is finite and positive; the integral and
    /// derivative terms are undefined otherwise.
    #[must_use]
    pub fn new(kp: f64, ki: f64, kd: f64, dt: f64) -> Self {
        assert!(dt > 0.0 && dt.is_finite(), "dt must be finite and > 0");
        Self {
            kp,
            ki,
            kd,
            dt,
            integral_limit: None,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    /// Create a controller from a validated [`PidConfig`].
    #[must_use]
    pub fn from_config(config: &PidConfig) -> Self {
        let mut pid = Self::new(config.kp, config.ki, config.kd, config.dt);
        pid.integral_limit = config.integral_limit;
        pid
    }

    /// Clamp the integral accumulator to `[-limit, limit]`.
    #[must_use]
    pub const fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = Some(limit);
        self
    }

    /// Advance one step: returns the control signal for the current error.
    pub fn compute(&mut self, setpoint: f64, measurement: f64) -> f64 {
        let error = setpoint - measurement;

        self.integral += error * self.dt;
        if let Some(limit) = self.integral_limit {
            self.integral = self.integral.clamp(-limit, limit);
        }

        let derivative = (error - self.prev_error) / self.dt;
        self.prev_error = error;

        self.kd
            .mul_add(derivative, self.kp.mul_add(error, self.ki * self.integral))
    }

    /// Accumulated integral term.
    #[must_use]
    pub const fn integral(&self) -> f64 {
        self.integral
    }

    /// Step interval (seconds).
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
