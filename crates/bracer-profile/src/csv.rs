//! CSV persistence for motion profiles.
//!
//! Format: a fixed header row followed by one `theta1,theta2` float pair per
//! line. Values are written in Rust's shortest round-trip representation, so
//! export followed by import reproduces the exact sequence bit for bit.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bracer_core::error::ProfileError;
use bracer_kinematics::JointAngles;

use crate::profile::MotionProfile;

/// Header row of a profile CSV file.
pub const CSV_HEADER: &str = "Theta1 (rad),Theta2 (rad)";

/// Write a profile to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ProfileError::Io`] if the file cannot be created or written.
pub fn write_profile(path: impl AsRef<Path>, profile: &MotionProfile) -> Result<(), ProfileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{CSV_HEADER}")?;
    for step in profile.iter() {
        writeln!(writer, "{},{}", step.theta1, step.theta2)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a profile from `path`.
///
/// Parses into a fresh profile and returns it only when every row is valid,
/// so a failed load never leaves a partially filled profile behind.
///
/// # Errors
///
/// - [`ProfileError::Io`] on read failure.
/// - [`ProfileError::InvalidHeader`] when the first line is not [`CSV_HEADER`].
/// - [`ProfileError::WrongFieldCount`] / [`ProfileError::InvalidField`] on
///   malformed rows, with the 1-based line number.
pub fn read_profile(path: impl AsRef<Path>) -> Result<MotionProfile, ProfileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    if header.trim_end() != CSV_HEADER {
        return Err(ProfileError::InvalidHeader {
            expected: CSV_HEADER,
            got: header,
        });
    }

    let mut profile = MotionProfile::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let row = line.trim_end();
        if row.is_empty() {
            continue;
        }
        // Header is line 1; data starts at line 2.
        let line_no = idx + 2;

        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() != 2 {
            return Err(ProfileError::WrongFieldCount {
                line: line_no,
                got: fields.len(),
            });
        }

        let theta1 = parse_field(fields[0], line_no)?;
        let theta2 = parse_field(fields[1], line_no)?;
        profile.push(JointAngles::new(theta1, theta2));
    }

    Ok(profile)
}

fn parse_field(text: &str, line: usize) -> Result<f64, ProfileError> {
    text.trim()
        .parse()
        .map_err(|_| ProfileError::InvalidField {
            line,
            text: text.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sample() -> MotionProfile {
        MotionProfile::from_steps(vec![
            JointAngles::new(0.0, 0.0),
            JointAngles::new(PI / 3.0, -PI / 7.0),
            JointAngles::new(-2.123_456_789_012_345, 1e-15),
            JointAngles::new(f64::MIN_POSITIVE, f64::MAX),
        ])
    }

    #[test]
    fn roundtrip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.csv");

        let original = sample();
        write_profile(&path, &original).unwrap();
        let loaded = read_profile(&path).unwrap();

        // Bit-exact: shortest round-trip float formatting
        assert_eq!(original, loaded);
    }

    #[test]
    fn written_file_has_expected_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.csv");
        write_profile(&path, &sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let first = content.lines().next().unwrap();
        assert_eq!(first, "Theta1 (rad),Theta2 (rad)");
    }

    #[test]
    fn empty_profile_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_profile(&path, &MotionProfile::new()).unwrap();
        let loaded = read_profile(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn rejects_wrong_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_header.csv");
        std::fs::write(&path, "t1,t2\n0.1,0.2\n").unwrap();

        let err = read_profile(&path).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidHeader { .. }));
    }

    #[test]
    fn rejects_malformed_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_number.csv");
        std::fs::write(
            &path,
            "Theta1 (rad),Theta2 (rad)\n0.1,0.2\nnot_a_number,0.4\n",
        )
        .unwrap();

        let err = read_profile(&path).unwrap_err();
        match err {
            ProfileError::InvalidField { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "not_a_number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_field_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_fields.csv");
        std::fs::write(&path, "Theta1 (rad),Theta2 (rad)\n0.1,0.2,0.3\n").unwrap();

        let err = read_profile(&path).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::WrongFieldCount { line: 2, got: 3 }
        ));
    }

    #[test]
    fn skips_trailing_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.csv");
        std::fs::write(&path, "Theta1 (rad),Theta2 (rad)\n0.5,0.25\n\n").unwrap();

        let loaded = read_profile(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0), Some(JointAngles::new(0.5, 0.25)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_profile("/nonexistent/profile.csv").unwrap_err();
        assert!(matches!(err, ProfileError::Io(_)));
    }

    #[test]
    fn accepts_special_float_spellings() {
        // `parse::<f64>` accepts inf/NaN spellings; exported profiles never
        // contain them but imports should not choke.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inf.csv");
        std::fs::write(&path, "Theta1 (rad),Theta2 (rad)\ninf,-inf\n").unwrap();
        let loaded = read_profile(&path).unwrap();
        assert!(loaded.get(0).unwrap().theta1.is_infinite());
    }
}
