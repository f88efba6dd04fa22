// This file is part of Cubeview.
//
// Cubeview is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Cubeview is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Cubeview.  If not, see <http://www.gnu.org/licenses/>.
use crate::{Vec3, TOLERANCE};
use nalgebra::Matrix4;
use std::{f64::consts::FRAC_PI_2, ops::Mul};

/// A rotation: `w` is the cosine of the half-angle and `(x, y, z)` the
/// rotation axis scaled by the sine of the half-angle.
///
/// Unnormalized values exist transiently while composing; anything that
/// is treated as a pure rotation must be re-normalized first. The camera
/// state upholds this by normalizing after every composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Componentwise scalar multiply.
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    /// Below-tolerance norms are left unchanged rather than inventing a
    /// rotation; see `inverse` for the identity fallback.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm < TOLERANCE {
            return;
        }
        self.w /= norm;
        self.x /= norm;
        self.y /= norm;
        self.z /= norm;
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Conjugate over the squared norm; identity when degenerate.
    pub fn inverse(&self) -> Self {
        let norm_squared = self.norm_squared();
        if norm_squared < TOLERANCE {
            return Self::identity();
        }
        let inv = 1.0 / norm_squared;
        Self::new(self.w * inv, -self.x * inv, -self.y * inv, -self.z * inv)
    }

    /// `axis` is assumed to be unit length; a non-unit axis produces a
    /// non-unit quaternion and that is on the caller.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Self {
        let half = angle / 2.0;
        let sin_half = half.sin();
        Self::new(
            half.cos(),
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
        )
    }

    /// The rotation carrying `from` onto `to`, via the half-angle
    /// identities on their dot and cross products. Both inputs should be
    /// unit length. Coincident (and degenerate antiparallel) inputs give
    /// the identity.
    pub fn from_vectors(from: &Vec3, to: &Vec3) -> Self {
        let dot = from.dot(to).clamp(-1.0, 1.0);
        let axis = from.cross(to);
        if axis.magnitude() < TOLERANCE {
            return Self::identity();
        }
        let axis = axis.normalized();
        let half_cos = ((1.0 + dot) / 2.0).sqrt();
        let half_sin = ((1.0 - dot) / 2.0).sqrt();
        Self::new(
            half_cos,
            axis.x * half_sin,
            axis.y * half_sin,
            axis.z * half_sin,
        )
        .normalized()
    }

    /// Angles in radians: `xa` rolls about x, `ya` pitches about y, `za`
    /// yaws about z, composed in z-y-x order.
    pub fn from_euler(xa: f64, ya: f64, za: f64) -> Self {
        let (sy, cy) = (za * 0.5).sin_cos();
        let (sp, cp) = (ya * 0.5).sin_cos();
        let (sr, cr) = (xa * 0.5).sin_cos();
        Self::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }

    /// Inverse of `from_euler`. The asin argument is clamped and the
    /// gimbal-locked pitch collapses to +-90 degrees via copysign.
    pub fn to_euler(&self) -> (f64, f64, f64) {
        let sinr_cosp = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr_cosp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let xa = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (self.w * self.y - self.z * self.x);
        let ya = if sinp.abs() >= 1.0 {
            FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let za = siny_cosp.atan2(cosy_cosp);

        (xa, ya, za)
    }

    /// Column-major homogeneous rotation matrix with zero translation,
    /// ready to be composed into a model/view transform.
    pub fn to_rotation_matrix(&self) -> Matrix4<f64> {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;
        let xx2 = self.x * x2;
        let xy2 = self.x * y2;
        let xz2 = self.x * z2;
        let yy2 = self.y * y2;
        let yz2 = self.y * z2;
        let zz2 = self.z * z2;
        let wx2 = self.w * x2;
        let wy2 = self.w * y2;
        let wz2 = self.w * z2;

        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0 - (yy2 + zz2), xy2 - wz2,         xz2 + wy2,         0.0,
            xy2 + wz2,         1.0 - (xx2 + zz2), yz2 - wx2,         0.0,
            xz2 - wy2,         yz2 + wx2,         1.0 - (xx2 + yy2), 0.0,
            0.0,               0.0,               0.0,               1.0,
        );
        m
    }

    /// Euler extraction from a rotation matrix. Near the pitch
    /// singularity the roll is resolved via atan2 of the stable entries
    /// and the yaw is zeroed.
    pub fn matrix_to_euler(m: &Matrix4<f64>) -> (f64, f64, f64) {
        let sy = (m[(0, 0)] * m[(0, 0)] + m[(1, 0)] * m[(1, 0)]).sqrt();
        if sy > 1e-6 {
            let xa = m[(2, 1)].atan2(m[(2, 2)]);
            let ya = (-m[(2, 0)]).atan2(sy);
            let za = m[(1, 0)].atan2(m[(0, 0)]);
            (xa, ya, za)
        } else {
            let xa = (-m[(1, 2)]).atan2(m[(1, 1)]);
            let ya = (-m[(2, 0)]).atan2(sy);
            (xa, ya, 0.0)
        }
    }

    /// `to_euler` routed through the rotation matrix; a diagnostic
    /// cross-check of the two conversion paths.
    pub fn euler_via_matrix(&self) -> (f64, f64, f64) {
        Self::matrix_to_euler(&self.to_rotation_matrix())
    }

    /// `q * (0, v) * q^-1`, vector part.
    pub fn rotate_vector(&self, v: &Vec3) -> Vec3 {
        let p = Self::new(0.0, v.x, v.y, v.z);
        let r = *self * p * self.inverse();
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    // Hamilton product: a * b applies b first, then a.
    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}
