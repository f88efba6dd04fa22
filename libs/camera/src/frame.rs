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
use geometry::{Quaternion, Vec3};
use nalgebra::Matrix4;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("update called before init_projection")]
    ProjectionNotInitialized,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FrameState {
    Uninitialized,
    ProjectionInitialized,
    Ready,
}

/// Per-frame output of the camera: the projection and model/view
/// transforms plus the raw components for diagnostic display.
#[derive(Clone, Copy, Debug)]
pub struct FrameTransform {
    pub projection: Matrix4<f64>,
    pub model_view: Matrix4<f64>,
    pub rotation: Matrix4<f64>,
    pub translation: Vec3,
    pub scaling: Vec3,
}

/// Accumulates translation, scale, and orientation across frames and turns
/// them into matrices once per tick.
///
/// Usage follows a strict progression: `init_projection` must be called
/// before the first `update`; mutation is legal at any time. The
/// orientation quaternion is re-normalized after every composition.
pub struct CameraFrame {
    state: FrameState,

    translation: Vec3,
    scaling: Vec3,
    orientation: Quaternion,

    fov_deg: f64,
    z_near: f64,
    z_far: f64,
    aspect: f64,

    translation_dirty: bool,
    rotation_dirty: bool,
    scaling_dirty: bool,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            state: FrameState::Uninitialized,
            translation: Vec3::new(0.0, 0.0, 0.0),
            scaling: Vec3::new(1.0, 1.0, 1.0),
            orientation: Quaternion::identity(),
            fov_deg: 0.0,
            z_near: 0.0,
            z_far: 0.0,
            aspect: 1.0,
            translation_dirty: false,
            rotation_dirty: false,
            scaling_dirty: false,
        }
    }
}

impl CameraFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_projection(&mut self, fov_deg: f64, z_near: f64, z_far: f64, aspect: f64) {
        self.fov_deg = fov_deg;
        self.z_near = z_near;
        self.z_far = z_far;
        self.aspect = aspect;
        if self.state == FrameState::Uninitialized {
            self.state = FrameState::ProjectionInitialized;
        }
    }

    // Resize path; does not move the state machine.
    pub fn set_aspect_ratio(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    /// Restore translation to the origin, scale to 1, orientation to
    /// identity. Does nothing before `init_projection`.
    pub fn reset(&mut self) {
        if self.state == FrameState::Uninitialized {
            return;
        }
        self.translation = Vec3::new(0.0, 0.0, 0.0);
        self.scaling = Vec3::new(1.0, 1.0, 1.0);
        self.orientation = Quaternion::identity();
        self.translation_dirty = true;
        self.rotation_dirty = true;
        self.scaling_dirty = true;
        self.state = FrameState::Ready;
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64, absolute: bool) {
        let delta = Vec3::new(dx, dy, dz);
        self.translation = if absolute {
            delta
        } else {
            self.translation + delta
        };
        self.translation_dirty = true;
        self.mark_ready();
    }

    pub fn rescale(&mut self, dxs: f64, dys: f64, dzs: f64, absolute: bool) {
        let delta = Vec3::new(dxs, dys, dzs);
        self.scaling = if absolute { delta } else { self.scaling + delta };
        self.scaling_dirty = true;
        self.mark_ready();
    }

    /// Compose an incremental rotation onto the accumulated orientation.
    /// The delta multiplies on the left, so applying q1 then q2 matches a
    /// single application of `q2 * q1`.
    pub fn apply_rotation(&mut self, delta: &Quaternion) {
        self.orientation = (*delta * self.orientation).normalized();
        self.rotation_dirty = true;
        self.mark_ready();
    }

    /// Recompute the frustum and model/view for this frame and clear the
    /// dirty flags. The model/view always composes translation, then
    /// rotation, then scale, independent of which components changed.
    pub fn update(&mut self) -> Result<FrameTransform, CameraError> {
        if self.state == FrameState::Uninitialized {
            return Err(CameraError::ProjectionNotInitialized);
        }

        let projection = self.frustum();
        let rotation = self.orientation.to_rotation_matrix();
        let model_view = Matrix4::new_translation(&self.translation.vec64())
            * rotation
            * Matrix4::new_nonuniform_scaling(&self.scaling.vec64());

        self.translation_dirty = false;
        self.rotation_dirty = false;
        self.scaling_dirty = false;

        Ok(FrameTransform {
            projection,
            model_view,
            rotation,
            translation: self.translation,
            scaling: self.scaling,
        })
    }

    // Symmetric glFrustum-style perspective.
    fn frustum(&self) -> Matrix4<f64> {
        let height = 2.0 * self.z_near * (self.fov_deg * PI / 360.0).tan();
        let width = height * self.aspect;
        let n = self.z_near;
        let f = self.z_far;

        #[rustfmt::skip]
        let m = Matrix4::new(
            2.0 * n / width, 0.0,              0.0,                  0.0,
            0.0,             2.0 * n / height, 0.0,                  0.0,
            0.0,             0.0,              -(f + n) / (f - n),   -2.0 * f * n / (f - n),
            0.0,             0.0,              -1.0,                 0.0,
        );
        m
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn scaling(&self) -> Vec3 {
        self.scaling
    }

    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    // Diagnostic readout, radians.
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        self.orientation.to_euler()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect
    }

    pub fn translation_dirty(&self) -> bool {
        self.translation_dirty
    }

    pub fn rotation_dirty(&self) -> bool {
        self.rotation_dirty
    }

    pub fn scaling_dirty(&self) -> bool {
        self.scaling_dirty
    }

    fn mark_ready(&mut self) {
        if self.state == FrameState::ProjectionInitialized {
            self.state = FrameState::Ready;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geometry::Quaternion;

    #[test]
    fn update_before_init_projection_is_fatal() {
        let mut camera = CameraFrame::new();
        assert!(matches!(
            camera.update(),
            Err(CameraError::ProjectionNotInitialized)
        ));
    }

    #[test]
    fn update_after_init_projection_succeeds() {
        let mut camera = CameraFrame::new();
        camera.init_projection(45.0, 1.0, 100.0, 800.0 / 600.0);
        let xform = camera.update().unwrap();
        assert_eq!(xform.model_view, Matrix4::identity());
        // w component of a projected point on the -z axis.
        assert_abs_diff_eq!(xform.projection[(3, 2)], -1.0);
    }

    #[test]
    fn reset_restores_the_identity_pose() {
        let mut camera = CameraFrame::new();
        camera.init_projection(45.0, 1.0, 100.0, 1.0);
        camera.translate(1.0, 2.0, 3.0, false);
        camera.rescale(0.5, 0.5, 0.5, false);
        camera.apply_rotation(&Quaternion::from_euler(0.3, 0.2, 0.1));

        camera.reset();
        let t = camera.translation();
        assert_eq!((t.x, t.y, t.z), (0.0, 0.0, 0.0));
        let s = camera.scaling();
        assert_eq!((s.x, s.y, s.z), (1.0, 1.0, 1.0));
        assert_eq!(camera.orientation(), Quaternion::identity());
    }

    #[test]
    fn reset_is_a_noop_while_uninitialized() {
        let mut camera = CameraFrame::new();
        camera.reset();
        assert!(matches!(
            camera.update(),
            Err(CameraError::ProjectionNotInitialized)
        ));
    }

    #[test]
    fn translation_accumulates_unless_absolute() {
        let mut camera = CameraFrame::new();
        camera.init_projection(45.0, 1.0, 100.0, 1.0);
        camera.translate(1.0, 0.0, 0.0, false);
        camera.translate(1.0, 2.0, 0.0, false);
        let t = camera.translation();
        assert_eq!((t.x, t.y, t.z), (2.0, 2.0, 0.0));

        camera.translate(0.0, 0.0, -10.0, true);
        let t = camera.translation();
        assert_eq!((t.x, t.y, t.z), (0.0, 0.0, -10.0));
    }

    #[test]
    fn rotation_composition_is_left_multiplied() {
        let q1 = Quaternion::from_euler(0.3, 0.0, 0.2);
        let q2 = Quaternion::from_euler(-0.1, 0.4, 0.0);

        let mut stepwise = CameraFrame::new();
        stepwise.init_projection(45.0, 1.0, 100.0, 1.0);
        stepwise.apply_rotation(&q1);
        stepwise.apply_rotation(&q2);

        let mut collapsed = CameraFrame::new();
        collapsed.init_projection(45.0, 1.0, 100.0, 1.0);
        collapsed.apply_rotation(&(q2 * q1));

        let a = stepwise.orientation();
        let b = collapsed.orientation();
        assert_abs_diff_eq!(a.w, b.w, epsilon = 1e-9);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn update_clears_the_dirty_flags() {
        let mut camera = CameraFrame::new();
        camera.init_projection(45.0, 1.0, 100.0, 1.0);
        camera.translate(1.0, 0.0, 0.0, false);
        camera.apply_rotation(&Quaternion::from_euler(0.1, 0.0, 0.0));
        camera.rescale(0.1, 0.1, 0.1, false);
        assert!(camera.translation_dirty());
        assert!(camera.rotation_dirty());
        assert!(camera.scaling_dirty());

        camera.update().unwrap();
        assert!(!camera.translation_dirty());
        assert!(!camera.rotation_dirty());
        assert!(!camera.scaling_dirty());
    }

    #[test]
    fn model_view_applies_translate_then_rotate_then_scale() {
        let mut camera = CameraFrame::new();
        camera.init_projection(45.0, 1.0, 100.0, 1.0);
        camera.translate(0.0, 0.0, -10.0, false);
        camera.apply_rotation(&Quaternion::from_euler(std::f64::consts::PI, 0.0, 0.0));
        camera.rescale(1.0, 1.0, 1.0, false); // now 2x

        let xform = camera.update().unwrap();
        // A point at +y, scaled by 2, flipped by the half-turn about x,
        // then pushed back along -z.
        let p = xform.model_view.transform_point(&nalgebra::Point3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, -10.0, epsilon = 1e-9);
    }
}
