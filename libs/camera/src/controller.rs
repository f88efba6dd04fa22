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
use crate::CameraFrame;
use anyhow::Result;
use arcball::ArcBall;
use command::{Bindings, Command};
use geometry::Quaternion;
use log::trace;
use std::f64::consts::PI;

// Degrees of rotation per frame while an arrow key is held.
const NUDGE_ROTATE_DEG: f64 = 1.0;
// World units of translation per frame while a shifted arrow is held.
const NUDGE_TRANSLATE: f64 = 0.2;
const PAN_SENSITIVITY: f64 = 0.01;
const ZOOM_STEP: f64 = 0.5;
const HOME_DISTANCE: f64 = -10.0;

/// Maps commands onto camera mutations: drag gestures run through the
/// arcball, held keys accumulate once per `think`, and discrete commands
/// (zoom, reset) apply immediately.
pub struct ArcBallController {
    camera: CameraFrame,
    arcball: ArcBall,

    in_rotate: bool,
    in_pan: bool,
    cursor: Option<(f64, f64)>,

    pitch_nudge_deg: f64,
    yaw_nudge_deg: f64,
    move_nudge: (f64, f64),
}

impl ArcBallController {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            camera: CameraFrame::new(),
            arcball: ArcBall::new(width, height),
            in_rotate: false,
            in_pan: false,
            cursor: None,
            pitch_nudge_deg: 0.0,
            yaw_nudge_deg: 0.0,
            move_nudge: (0.0, 0.0),
        }
    }

    pub fn camera(&self) -> &CameraFrame {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraFrame {
        &mut self.camera
    }

    pub fn default_bindings() -> Result<Bindings> {
        Bindings::new("arc_ball_controller")
            .bind("+rotate-view", "mouse2")?
            .bind("+pan-view", "Shift+mouse2")?
            .bind("+pitch-up", "Up")?
            .bind("+pitch-down", "Down")?
            .bind("+yaw-left", "Left")?
            .bind("+yaw-right", "Right")?
            .bind("+move-up", "Shift+Up")?
            .bind("+move-down", "Shift+Down")?
            .bind("+move-left", "Shift+Left")?
            .bind("+move-right", "Shift+Right")?
            .bind("zoom-in", "Equals")?
            .bind("zoom-out", "Minus")?
            .bind("reset-view", "r")
    }

    /// The demo's rest pose: model pushed back along -z and flipped a half
    /// turn about x so its "front" faces the viewer.
    pub fn home(&mut self) {
        self.camera.reset();
        self.camera.translate(0.0, 0.0, HOME_DISTANCE, false);
        self.camera
            .apply_rotation(&Quaternion::from_euler(PI, 0.0, 0.0));
    }

    pub fn handle_command(&mut self, command: &Command) -> Result<()> {
        match command.name() {
            "+rotate-view" => self.in_rotate = true,
            "-rotate-view" => self.in_rotate = false,
            "+pan-view" => self.in_pan = true,
            "-pan-view" => self.in_pan = false,
            "+pitch-up" => self.pitch_nudge_deg = -NUDGE_ROTATE_DEG,
            "-pitch-up" => self.pitch_nudge_deg = 0.0,
            "+pitch-down" => self.pitch_nudge_deg = NUDGE_ROTATE_DEG,
            "-pitch-down" => self.pitch_nudge_deg = 0.0,
            "+yaw-left" => self.yaw_nudge_deg = -NUDGE_ROTATE_DEG,
            "-yaw-left" => self.yaw_nudge_deg = 0.0,
            "+yaw-right" => self.yaw_nudge_deg = NUDGE_ROTATE_DEG,
            "-yaw-right" => self.yaw_nudge_deg = 0.0,
            "+move-up" => self.move_nudge.1 = NUDGE_TRANSLATE,
            "-move-up" => self.move_nudge.1 = 0.0,
            "+move-down" => self.move_nudge.1 = -NUDGE_TRANSLATE,
            "-move-down" => self.move_nudge.1 = 0.0,
            "+move-left" => self.move_nudge.0 = -NUDGE_TRANSLATE,
            "-move-left" => self.move_nudge.0 = 0.0,
            "+move-right" => self.move_nudge.0 = NUDGE_TRANSLATE,
            "-move-right" => self.move_nudge.0 = 0.0,
            "zoom-in" => self.camera.translate(0.0, 0.0, ZOOM_STEP, false),
            "zoom-out" => self.camera.translate(0.0, 0.0, -ZOOM_STEP, false),
            "reset-view" => self.home(),
            "mouse-move" => self.on_mousemove(command)?,
            "mouse-wheel" => self.on_mousescroll(command)?,
            "window-resize" => self.on_resize(command)?,
            _ => trace!("unhandled command: {}", command.name()),
        }
        Ok(())
    }

    /// Apply the held-key nudges; called once per frame by the run loop.
    pub fn think(&mut self) {
        if self.pitch_nudge_deg != 0.0 || self.yaw_nudge_deg != 0.0 {
            self.camera.apply_rotation(&Quaternion::from_euler(
                self.pitch_nudge_deg.to_radians(),
                self.yaw_nudge_deg.to_radians(),
                0.0,
            ));
        }
        if self.move_nudge != (0.0, 0.0) {
            self.camera
                .translate(self.move_nudge.0, self.move_nudge.1, 0.0, false);
        }
    }

    fn on_mousemove(&mut self, command: &Command) -> Result<()> {
        let (x, y) = command.displacement()?;

        if let Some((px, py)) = self.cursor {
            if self.in_rotate {
                let delta = self.arcball.drag_rotation((px, py), (x, y));
                self.camera.apply_rotation(&delta);
            }
            if self.in_pan {
                // Window y grows downward; world y grows upward.
                self.camera.translate(
                    (x - px) * PAN_SENSITIVITY,
                    (py - y) * PAN_SENSITIVITY,
                    0.0,
                    false,
                );
            }
        }
        self.cursor = Some((x, y));

        Ok(())
    }

    fn on_mousescroll(&mut self, command: &Command) -> Result<()> {
        let y = command.displacement()?.1;
        if y > 0.0 {
            self.camera.translate(0.0, 0.0, ZOOM_STEP, false);
        } else if y < 0.0 {
            self.camera.translate(0.0, 0.0, -ZOOM_STEP, false);
        }
        Ok(())
    }

    fn on_resize(&mut self, command: &Command) -> Result<()> {
        let (width, height) = command.displacement()?;
        self.arcball.set_dimensions(width, height);
        if height > 0.0 {
            self.camera.set_aspect_ratio(width / height);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mouse_move(x: f64, y: f64) -> Command {
        Command::with_arg("mouse-move", (x, y))
    }

    fn controller() -> ArcBallController {
        let mut c = ArcBallController::new(800.0, 600.0);
        c.camera_mut().init_projection(45.0, 1.0, 100.0, 800.0 / 600.0);
        c
    }

    #[test]
    fn rightward_drag_leaves_a_yaw_dominant_orientation() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::new("+rotate-view"))?;
        c.handle_command(&mouse_move(401.0, 300.0))?;
        c.handle_command(&mouse_move(500.0, 300.0))?;
        c.handle_command(&Command::new("-rotate-view"))?;

        let (xa, ya, za) = c.camera().euler_angles();
        assert!(ya.abs() > xa.abs());
        assert!(ya.abs() > za.abs());
        assert!(ya > 0.0);
        Ok(())
    }

    #[test]
    fn motion_without_rotate_held_does_not_rotate() -> Result<()> {
        let mut c = controller();
        c.handle_command(&mouse_move(401.0, 300.0))?;
        c.handle_command(&mouse_move(500.0, 300.0))?;
        assert_eq!(c.camera().orientation(), Quaternion::identity());
        Ok(())
    }

    #[test]
    fn reset_view_restores_the_home_pose() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::new("zoom-in"))?;
        c.handle_command(&Command::new("+yaw-right"))?;
        c.think();
        c.handle_command(&Command::new("-yaw-right"))?;

        c.handle_command(&Command::new("reset-view"))?;
        let t = c.camera().translation();
        assert_eq!((t.x, t.y, t.z), (0.0, 0.0, -10.0));
        let (xa, ya, za) = c.camera().euler_angles();
        assert_abs_diff_eq!(xa.abs(), PI, epsilon = 1e-9);
        assert_abs_diff_eq!(ya, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(za, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn held_yaw_nudge_accumulates_per_frame() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::new("+yaw-right"))?;
        for _ in 0..10 {
            c.think();
        }
        c.handle_command(&Command::new("-yaw-right"))?;
        let (_, ya, _) = c.camera().euler_angles();
        assert_abs_diff_eq!(ya.to_degrees(), 10.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn pan_follows_the_pointer() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::new("+pan-view"))?;
        c.handle_command(&mouse_move(100.0, 100.0))?;
        c.handle_command(&mouse_move(200.0, 50.0))?;

        let t = c.camera().translation();
        assert_abs_diff_eq!(t.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.y, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t.z, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn wheel_zooms_along_z() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::with_arg("mouse-wheel", (0.0, 1.0)))?;
        assert_abs_diff_eq!(c.camera().translation().z, 0.5, epsilon = 1e-9);
        c.handle_command(&Command::with_arg("mouse-wheel", (0.0, -1.0)))?;
        assert_abs_diff_eq!(c.camera().translation().z, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn resize_updates_the_aspect_ratio() -> Result<()> {
        let mut c = controller();
        c.handle_command(&Command::with_arg("window-resize", (1024.0, 512.0)))?;
        assert_abs_diff_eq!(c.camera().aspect_ratio(), 2.0, epsilon = 1e-9);
        Ok(())
    }
}
