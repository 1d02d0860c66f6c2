//! Kinematics for the bracer two-link forearm.
//!
//! Two layers are provided:
//! - [`dh`]: general serial-chain forward kinematics in Denavit-Hartenberg
//!   convention, producing 4x4 homogeneous transforms.
//! - [`planar`]: the closed-form 2-link planar arm used by the simulator,
//!   with forward kinematics and the elbow-up inverse solution.
//!
//! # Architecture
//!
//! ```text
//! target (x, y) ──► PlanarArm::inverse ──► JointAngles ──► PlanarArm::forward ──► ArmPose
//! ```
//!
//! Both layers are pure: no state is retained between calls, and the only
//! failure mode is an out-of-workspace IK target.

pub mod dh;
pub mod planar;

pub use dh::{dh_transform, DhParam, SerialChain};
pub use planar::{ArmPose, JointAngles, PlanarArm};
