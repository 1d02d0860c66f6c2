//! Cross-crate flow: trajectory sweep through IK, capture, CSV round-trip.

use approx::assert_relative_eq;

use bracer_core::config::ArmConfig;
use bracer_profile::{circular_trajectory, read_profile};
use bracer_session::ArmSession;

#[test]
fn trajectory_sweep_capture_and_reload() {
    let cfg = ArmConfig {
        l1: 1.0,
        l2: 1.0,
        max_elbow_angle_deg: 179.0,
    };
    let mut session = ArmSession::new(&cfg).unwrap();

    // A radius-1.2 circle lies strictly inside the unit arm's annulus.
    let mut captured = 0;
    for (x, y) in circular_trajectory(1.2, 36) {
        session.solve_ik(x, y).unwrap();
        session.capture_step();
        captured += 1;
    }
    assert_eq!(session.capture().len(), captured);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.csv");
    session.export_capture(&path).unwrap();

    let reloaded = read_profile(&path).unwrap();
    assert_eq!(reloaded.steps(), session.capture().steps());

    // Replaying the reloaded steps reproduces the circle.
    session.load_profile(&path).unwrap();
    let poses = session.replay_loaded().unwrap();
    for pose in poses {
        let radius = pose.end_effector[0].hypot(pose.end_effector[1]);
        assert_relative_eq!(radius, 1.2, epsilon = 1e-9);
    }
}
