//! Motion profiles for the bracer forearm.
//!
//! A [`MotionProfile`] is an ordered sequence of joint-angle pairs, captured
//! step by step during a session and persisted as CSV. Loading is atomic:
//! a malformed file leaves the previously loaded profile untouched.

pub mod csv;
pub mod profile;
pub mod trajectory;

pub use csv::{read_profile, write_profile, CSV_HEADER};
pub use profile::MotionProfile;
pub use trajectory::circular_trajectory;
