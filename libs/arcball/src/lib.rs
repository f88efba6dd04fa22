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
use geometry::{Quaternion, Vec3, TOLERANCE};
use log::trace;

/// Maps a mouse drag across the viewport to a rotation by lifting both
/// endpoints onto a sphere centered in the window and taking the rotation
/// that carries one lifted point onto the other.
#[derive(Clone, Copy, Debug)]
pub struct ArcBall {
    width: f64,
    height: f64,
}

impl ArcBall {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The incremental rotation for a drag from `p1` to `p2` in window
    /// coordinates (origin top-left, y down). Degenerate drags all map to
    /// the identity rather than guessing: endpoints outside the viewport,
    /// coincident endpoints, or a start pinned on the window center where
    /// the lifted direction is undefined.
    pub fn drag_rotation(&self, p1: (f64, f64), p2: (f64, f64)) -> Quaternion {
        if !self.contains(p1) || !self.contains(p2) {
            trace!("arcball: drag endpoint outside {}x{} viewport", self.width, self.height);
            return Quaternion::identity();
        }

        let a = self.center_relative(p1);
        let b = self.center_relative(p2);

        let r1 = a.magnitude();
        let r2 = b.magnitude();
        if (a - b).magnitude() < TOLERANCE || r1 < TOLERANCE {
            trace!("arcball: degenerate drag, returning identity");
            return Quaternion::identity();
        }

        // A sphere big enough to catch drags that start near the window
        // corners.
        let radius = self.width.max(self.height).max(r1).max(r2);
        let v1 = Self::lift(&a, r1, radius);
        let v2 = Self::lift(&b, r2, radius);

        Quaternion::from_vectors(&v1, &v2).normalized()
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        p.0 >= 0.0 && p.0 <= self.width && p.1 >= 0.0 && p.1 <= self.height
    }

    // Recenter on the window midpoint and flip into a y-up frame.
    fn center_relative(&self, p: (f64, f64)) -> Vec3 {
        Vec3::new(p.0 - self.width / 2.0, self.height / 2.0 - p.1, 0.0)
    }

    // Lift the in-plane point onto the hemisphere facing the viewer.
    fn lift(p: &Vec3, r: f64, radius: f64) -> Vec3 {
        let z = (radius * radius - r * r).max(0.0).sqrt();
        Vec3::new(p.x, p.y, z).normalized()
    }
}
