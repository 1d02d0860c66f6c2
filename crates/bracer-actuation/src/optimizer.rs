//! Bounded actuation optimizer.
//!
//! Finds the pressure/contraction pair that best realizes a target joint
//! angle under the simplified contraction-to-angle mapping, with a quadratic
//! effort penalty:
//!
//! ```text
//! cost = 10 * |target - contraction * pi| + pressure^2 + contraction^2
//! s.t.   pressure    in [0.1, 5]
//!        contraction in [0, 1]
//! ```
//!
//! Solved with an in-house Nelder-Mead simplex, box-constrained by projecting
//! reflected and expanded points back into bounds (centroid, contraction, and
//! shrink points are convex combinations of feasible points and stay inside).
//! Local minimization only; no global-optimality guarantee.

use serde::{Deserialize, Serialize};

/// Pressure bounds (bar).
pub const PRESSURE_BOUNDS: (f64, f64) = (0.1, 5.0);
/// Contraction-ratio bounds.
pub const CONTRACTION_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Weight of the target-angle error against the effort penalty.
const ANGLE_WEIGHT: f64 = 10.0;

// Standard Nelder-Mead coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

// ---------------------------------------------------------------------------
// OptimizerConfig
// ---------------------------------------------------------------------------

/// Configuration for the simplex search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Iteration cap: the search stops here even without convergence.
    pub max_iterations: u32,
    /// Cost-spread tolerance across the simplex for convergence.
    pub tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-10,
        }
    }
}

// ---------------------------------------------------------------------------
// ActuationSolution
// ---------------------------------------------------------------------------

/// Result of an actuation optimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuationSolution {
    /// Optimal pressure (bar), always within [`PRESSURE_BOUNDS`].
    pub pressure: f64,
    /// Optimal contraction ratio, always within [`CONTRACTION_BOUNDS`].
    pub contraction: f64,
    /// Achieved cost value.
    pub cost: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the simplex converged within tolerance before the cap.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// optimize_actuation
// ---------------------------------------------------------------------------

/// Minimize the actuation cost for `target_angle` (rad).
///
/// `initial_guess` is `(pressure, contraction)`; out-of-bounds guesses are
/// projected into the feasible box before the search starts, so the returned
/// pair always satisfies the bounds.
#[must_use]
pub fn optimize_actuation(
    target_angle: f64,
    initial_guess: (f64, f64),
    config: &OptimizerConfig,
) -> ActuationSolution {
    let cost = |x: [f64; 2]| actuation_cost(target_angle, x[0], x[1]);

    let x0 = clamp_point([initial_guess.0, initial_guess.1]);
    let mut simplex = initial_simplex(x0);
    let mut f = simplex.map(cost);

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        order(&mut simplex, &mut f);

        if f[2] - f[0] < config.tolerance && diameter(&simplex) < config.tolerance.sqrt() {
            converged = true;
            break;
        }

        // Centroid of the two best vertices.
        let centroid = [
            (simplex[0][0] + simplex[1][0]) / 2.0,
            (simplex[0][1] + simplex[1][1]) / 2.0,
        ];

        let reflected = clamp_point([
            centroid[0] + REFLECT * (centroid[0] - simplex[2][0]),
            centroid[1] + REFLECT * (centroid[1] - simplex[2][1]),
        ]);
        let f_reflected = cost(reflected);

        if f_reflected < f[0] {
            // Best so far: try expanding further in the same direction.
            let expanded = clamp_point([
                centroid[0] + EXPAND * (reflected[0] - centroid[0]),
                centroid[1] + EXPAND * (reflected[1] - centroid[1]),
            ]);
            let f_expanded = cost(expanded);
            if f_expanded < f_reflected {
                simplex[2] = expanded;
                f[2] = f_expanded;
            } else {
                simplex[2] = reflected;
                f[2] = f_reflected;
            }
        } else if f_reflected < f[1] {
            simplex[2] = reflected;
            f[2] = f_reflected;
        } else {
            // Contract toward whichever of reflected/worst is better.
            let toward = if f_reflected < f[2] {
                reflected
            } else {
                simplex[2]
            };
            let contracted = [
                centroid[0] + CONTRACT * (toward[0] - centroid[0]),
                centroid[1] + CONTRACT * (toward[1] - centroid[1]),
            ];
            let f_contracted = cost(contracted);

            if f_contracted < f_reflected.min(f[2]) {
                simplex[2] = contracted;
                f[2] = f_contracted;
            } else {
                // Shrink everything toward the best vertex.
                for i in 1..3 {
                    simplex[i] = [
                        simplex[0][0] + SHRINK * (simplex[i][0] - simplex[0][0]),
                        simplex[0][1] + SHRINK * (simplex[i][1] - simplex[0][1]),
                    ];
                    f[i] = cost(simplex[i]);
                }
            }
        }
    }

    order(&mut simplex, &mut f);
    ActuationSolution {
        pressure: simplex[0][0],
        contraction: simplex[0][1],
        cost: f[0],
        iterations,
        converged,
    }
}

/// Weighted cost: angle error plus quadratic actuation effort.
fn actuation_cost(target_angle: f64, pressure: f64, contraction: f64) -> f64 {
    let angle_error = (target_angle - contraction * std::f64::consts::PI).abs();
    ANGLE_WEIGHT.mul_add(angle_error, pressure * pressure + contraction * contraction)
}

/// Project a point into the feasible box.
fn clamp_point(x: [f64; 2]) -> [f64; 2] {
    [
        x[0].clamp(PRESSURE_BOUNDS.0, PRESSURE_BOUNDS.1),
        x[1].clamp(CONTRACTION_BOUNDS.0, CONTRACTION_BOUNDS.1),
    ]
}

/// Seed simplex: the guess plus one offset vertex per dimension, stepping
/// inward when the offset would leave the box.
fn initial_simplex(x0: [f64; 2]) -> [[f64; 2]; 3] {
    let steps = [
        0.1 * (PRESSURE_BOUNDS.1 - PRESSURE_BOUNDS.0),
        0.1 * (CONTRACTION_BOUNDS.1 - CONTRACTION_BOUNDS.0),
    ];
    let highs = [PRESSURE_BOUNDS.1, CONTRACTION_BOUNDS.1];

    let mut simplex = [x0, x0, x0];
    for dim in 0..2 {
        let mut p = x0;
        p[dim] += steps[dim];
        if p[dim] > highs[dim] {
            p[dim] = x0[dim] - steps[dim];
        }
        simplex[dim + 1] = clamp_point(p);
    }
    simplex
}

/// Sort vertices by ascending cost.
fn order(simplex: &mut [[f64; 2]; 3], f: &mut [f64; 3]) {
    // 3-element insertion sort keeps points and costs paired.
    for i in 1..3 {
        let mut j = i;
        while j > 0 && f[j] < f[j - 1] {
            f.swap(j, j - 1);
            simplex.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Largest coordinate spread from the best vertex.
fn diameter(simplex: &[[f64; 2]; 3]) -> f64 {
    let mut d: f64 = 0.0;
    for vertex in &simplex[1..] {
        for dim in 0..2 {
            d = d.max((vertex[dim] - simplex[0][dim]).abs());
        }
    }
    d
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    // The cost is separable: pressure's optimum is always the lower bound,
    // and contraction's optimum sits at the kink target/pi (clamped to its
    // bounds) because the angle-error slope dominates the quadratic term.
    fn analytic_optimum(target: f64) -> (f64, f64, f64) {
        let c = (target / PI).clamp(0.0, 1.0);
        let cost = 10.0 * (target - c * PI).abs() + 0.01 + c * c;
        (0.1, c, cost)
    }

    #[test]
    fn finds_half_pi_optimum() {
        let solution = optimize_actuation(FRAC_PI_2, (1.0, 0.5), &OptimizerConfig::default());
        let (p, c, cost) = analytic_optimum(FRAC_PI_2);
        assert!(solution.converged);
        assert_relative_eq!(solution.pressure, p, epsilon = 1e-6);
        assert_relative_eq!(solution.contraction, c, epsilon = 1e-6);
        assert_relative_eq!(solution.cost, cost, epsilon = 1e-6);
    }

    #[test]
    fn converges_from_any_in_bounds_guess() {
        let guesses = [(0.1, 0.0), (5.0, 1.0), (2.5, 0.9), (4.9, 0.01)];
        let (_, _, best) = analytic_optimum(FRAC_PI_2);
        for guess in guesses {
            let solution = optimize_actuation(FRAC_PI_2, guess, &OptimizerConfig::default());
            assert!(solution.converged, "no convergence from {guess:?}");
            assert_relative_eq!(solution.cost, best, epsilon = 1e-6);
        }
    }

    #[test]
    fn output_always_within_bounds() {
        let targets = [0.0, FRAC_PI_2, PI, 2.0, 4.0, -1.0];
        let guesses = [(0.1, 0.0), (5.0, 1.0), (1.0, 0.5), (-10.0, 7.0)];
        for target in targets {
            for guess in guesses {
                let solution = optimize_actuation(target, guess, &OptimizerConfig::default());
                assert!(
                    (PRESSURE_BOUNDS.0..=PRESSURE_BOUNDS.1).contains(&solution.pressure),
                    "pressure out of bounds: {}",
                    solution.pressure
                );
                assert!(
                    (CONTRACTION_BOUNDS.0..=CONTRACTION_BOUNDS.1).contains(&solution.contraction),
                    "contraction out of bounds: {}",
                    solution.contraction
                );
            }
        }
    }

    #[test]
    fn saturates_contraction_for_large_targets() {
        // target = 4 rad > pi: best reachable mapping is full contraction.
        let solution = optimize_actuation(4.0, (1.0, 0.5), &OptimizerConfig::default());
        assert!(solution.converged);
        assert_relative_eq!(solution.contraction, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_target_relaxes_muscle() {
        let solution = optimize_actuation(0.0, (2.0, 0.8), &OptimizerConfig::default());
        assert!(solution.converged);
        assert_relative_eq!(solution.contraction, 0.0, epsilon = 1e-6);
        assert_relative_eq!(solution.pressure, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn iteration_cap_is_honored() {
        let config = OptimizerConfig {
            max_iterations: 3,
            tolerance: 1e-10,
        };
        let solution = optimize_actuation(FRAC_PI_2, (5.0, 1.0), &config);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 3);
    }

    #[test]
    fn achieved_cost_matches_reported_point() {
        let solution = optimize_actuation(2.0, (1.0, 0.5), &OptimizerConfig::default());
        let recomputed = 10.0 * (2.0 - solution.contraction * PI).abs()
            + solution.pressure * solution.pressure
            + solution.contraction * solution.contraction;
        assert_relative_eq!(solution.cost, recomputed, epsilon = 1e-12);
    }
}
