//! Trajectory generators for driving the arm through workspace paths.

use std::f64::consts::TAU;

/// Waypoints `(x, y)` evenly spaced on a full circle of `radius`.
///
/// Produces `steps` points including both endpoints (the last waypoint
/// returns to the start of the circle), matching a linear sweep of the
/// angle from 0 to 2*pi.
pub fn circular_trajectory(radius: f64, steps: usize) -> impl Iterator<Item = (f64, f64)> {
    #[allow(clippy::cast_precision_loss)]
    let divisor = steps.saturating_sub(1).max(1) as f64;
    (0..steps).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let angle = TAU * i as f64 / divisor;
        (radius * angle.cos(), radius * angle.sin())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn yields_requested_count() {
        assert_eq!(circular_trajectory(1.0, 100).count(), 100);
        assert_eq!(circular_trajectory(1.0, 0).count(), 0);
    }

    #[test]
    fn starts_and_ends_at_radius_on_x_axis() {
        let points: Vec<_> = circular_trajectory(2.0, 50).collect();
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert_relative_eq!(first.0, 2.0, epsilon = 1e-12);
        assert_relative_eq!(first.1, 0.0, epsilon = 1e-12);
        assert_relative_eq!(last.0, 2.0, epsilon = 1e-9);
        assert_relative_eq!(last.1, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn all_points_on_the_circle() {
        for (x, y) in circular_trajectory(0.75, 33) {
            assert_relative_eq!(x.hypot(y), 0.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_step_is_the_start_point() {
        let points: Vec<_> = circular_trajectory(1.5, 1).collect();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].0, 1.5, epsilon = 1e-12);
        assert_relative_eq!(points[0].1, 0.0, epsilon = 1e-12);
    }
}
