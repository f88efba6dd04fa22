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
use crate::TOLERANCE;
use nalgebra::Vector3;
use std::ops::{Add, Neg, Sub};

/// A plain 3d vector. Drag geometry coming off the input layer is
/// frequently malformed, so `normalize` tolerates zero-length inputs
/// instead of producing NaNs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// No-op when the magnitude is below [TOLERANCE].
    pub fn normalize(&mut self) {
        let norm = self.magnitude();
        if norm < TOLERANCE {
            return;
        }
        self.x /= norm;
        self.y /= norm;
        self.z /= norm;
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn vec64(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -2.0, 0.5);
        assert_eq!(a + b, Vec3::new(5.0, 0.0, 3.5));
        assert_eq!(a - b, Vec3::new(-3.0, 4.0, 2.5));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn dot_and_cross_are_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), z);
        assert_eq!(y.cross(&z), x);
        assert_eq!(z.cross(&x), y);
        assert_eq!(y.cross(&x), -z);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.x, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(v.z, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn normalize_of_degenerate_vector_is_a_noop() {
        let mut v = Vec3::new(1e-4, -1e-4, 0.0);
        let before = v;
        v.normalize();
        assert_eq!(v, before);
        assert_eq!(Vec3::default().normalized(), Vec3::default());
    }

    #[test]
    fn nalgebra_interop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let n = v.vec64();
        assert_eq!(Vec3::from(n), v);
    }
}
