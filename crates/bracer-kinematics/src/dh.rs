//! Serial-chain forward kinematics in Denavit-Hartenberg convention.

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DhParam
// ---------------------------------------------------------------------------

/// One joint-link pair in standard Denavit-Hartenberg convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DhParam {
    /// Link length `a` (meters): translation along the rotated x axis.
    pub a: f64,
    /// Link twist `alpha` (radians): rotation about the rotated x axis.
    pub alpha: f64,
    /// Link offset `d` (meters): translation along the joint z axis.
    pub d: f64,
    /// Joint angle `theta` (radians): rotation about the joint z axis.
    pub theta: f64,
}

impl DhParam {
    /// Create a DH tuple `(a, alpha, d, theta)`.
    #[must_use]
    pub const fn new(a: f64, alpha: f64, d: f64, theta: f64) -> Self {
        Self { a, alpha, d, theta }
    }
}

/// Elementary transform for a single DH tuple.
///
/// `T = Rot_z(theta) * Trans_z(d) * Trans_x(a) * Rot_x(alpha)`, returned as a
/// 4x4 homogeneous matrix (3x3 rotation block, 3x1 translation, affine row).
/// Any finite inputs are valid.
#[must_use]
pub fn dh_transform(p: &DhParam) -> Matrix4<f64> {
    let (st, ct) = p.theta.sin_cos();
    let (sa, ca) = p.alpha.sin_cos();

    Matrix4::new(
        ct, -st * ca, st * sa, p.a * ct, //
        st, ct * ca, -ct * sa, p.a * st, //
        0.0, sa, ca, p.d, //
        0.0, 0.0, 0.0, 1.0,
    )
}

// ---------------------------------------------------------------------------
// SerialChain
// ---------------------------------------------------------------------------

/// An ordered serial kinematic chain of DH joint-link pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerialChain {
    params: Vec<DhParam>,
}

impl SerialChain {
    /// Build a chain from DH tuples in base-to-end-effector order.
    #[must_use]
    pub fn new(params: Vec<DhParam>) -> Self {
        Self { params }
    }

    /// Number of joint-link pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the chain has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Access the DH tuples.
    #[must_use]
    pub fn params(&self) -> &[DhParam] {
        &self.params
    }

    /// Compose the end-effector transform, left to right from the identity.
    ///
    /// Pure function: any finite chain is valid, an empty chain yields the
    /// identity.
    #[must_use]
    pub fn forward_kinematics(&self) -> Matrix4<f64> {
        self.params
            .iter()
            .fold(Matrix4::identity(), |t, p| t * dh_transform(p))
    }

    /// Translation block of the end-effector transform.
    #[must_use]
    pub fn end_effector_position(&self) -> Vector3<f64> {
        let t = self.forward_kinematics();
        Vector3::new(t[(0, 3)], t[(1, 3)], t[(2, 3)])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
