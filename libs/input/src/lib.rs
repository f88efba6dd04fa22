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
use command::{Bindings, Command, Key};
use log::trace;
use smallvec::{smallvec, SmallVec};
use std::collections::HashMap;
use winit::event::{
    ElementState, Event, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
};

/// Turns raw window events into named commands by running them through a
/// prioritized stack of key bindings. The last pushed binding set that
/// matches an input wins.
pub struct InputSystem {
    bindings: Vec<Bindings>,

    // Track key states so that we can match button combos.
    button_state: HashMap<Key, ElementState>,

    // Absolute cursor position, tracked so that drag commands can carry
    // positions rather than deltas.
    cursor: Option<(f64, f64)>,
}

impl InputSystem {
    pub fn new(bindings: Vec<Bindings>) -> Self {
        Self {
            bindings,
            button_state: HashMap::new(),
            cursor: None,
        }
    }

    pub fn push_bindings(&mut self, bindings: Bindings) {
        self.bindings.push(bindings);
    }

    pub fn pop_bindings(&mut self) -> Option<Bindings> {
        self.bindings.pop()
    }

    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn handle_event(&mut self, e: &Event<'_, ()>) -> SmallVec<[Command; 8]> {
        match e {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(s) => {
                    self.handle_resize(f64::from(s.width), f64::from(s.height))
                }
                WindowEvent::KeyboardInput { input, .. } => match input.virtual_keycode {
                    Some(code) => self.handle_keyboard(code, input.state),
                    None => smallvec![],
                },
                WindowEvent::MouseInput { button, state, .. } => {
                    self.handle_mouse_button(*button, *state)
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.handle_cursor_moved(position.x, position.y)
                }
                WindowEvent::MouseWheel { delta, .. } => match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        self.handle_wheel(f64::from(*x), f64::from(*y))
                    }
                    MouseScrollDelta::PixelDelta(p) => self.handle_wheel(p.x, p.y),
                },
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    smallvec![Command::new("window-close")]
                }
                _ => smallvec![],
            },
            _ => smallvec![],
        }
    }

    pub fn handle_keyboard(
        &mut self,
        code: VirtualKeyCode,
        state: ElementState,
    ) -> SmallVec<[Command; 8]> {
        let key = Key::Virtual(code);
        // Key repeat shows up as extra presses; chords only care about edges.
        if state == ElementState::Pressed
            && self.button_state.get(&key) == Some(&ElementState::Pressed)
        {
            return smallvec![];
        }
        self.button_state.insert(key, state);
        self.match_key(key, state)
    }

    pub fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> SmallVec<[Command; 8]> {
        let key = Key::MouseButton(button_number(button));
        self.button_state.insert(key, state);
        self.match_key(key, state)
    }

    /// Cursor motion is not bindable; it always surfaces as a `mouse-move`
    /// carrying the absolute window position.
    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) -> SmallVec<[Command; 8]> {
        self.cursor = Some((x, y));
        smallvec![Command::with_arg("mouse-move", (x, y))]
    }

    pub fn handle_wheel(&mut self, dx: f64, dy: f64) -> SmallVec<[Command; 8]> {
        smallvec![Command::with_arg("mouse-wheel", (dx, dy))]
    }

    pub fn handle_resize(&mut self, width: f64, height: f64) -> SmallVec<[Command; 8]> {
        trace!("window resized to {}x{}", width, height);
        smallvec![Command::with_arg("window-resize", (width, height))]
    }

    fn match_key(&self, key: Key, state: ElementState) -> SmallVec<[Command; 8]> {
        let mut out = SmallVec::new();
        for bindings in self.bindings.iter().rev() {
            out.extend(bindings.match_key(key, state, &self.button_state));
        }
        out
    }
}

// X11-style numbering: left, middle, right are 1, 2, 3.
fn button_number(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
        MouseButton::Other(n) => u32::from(n),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use approx::assert_relative_eq;

    #[test]
    fn test_cursor_and_wheel_commands() {
        let mut input = InputSystem::new(vec![]);

        let cmds = input.handle_cursor_moved(8.0, 9.0);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].name(), "mouse-move");
        assert_relative_eq!(cmds[0].displacement().unwrap().0, 8.0);
        assert_relative_eq!(cmds[0].displacement().unwrap().1, 9.0);
        assert_eq!(input.cursor_position(), Some((8.0, 9.0)));

        let cmds = input.handle_wheel(0.0, -1.0);
        assert_eq!(cmds[0].name(), "mouse-wheel");
        assert_relative_eq!(cmds[0].displacement().unwrap().1, -1.0);

        let cmds = input.handle_resize(640.0, 480.0);
        assert_eq!(cmds[0].name(), "window-resize");
        assert_relative_eq!(cmds[0].displacement().unwrap().0, 640.0);
    }

    #[test]
    fn test_stateful_mouse_binding() -> Result<()> {
        let view = Bindings::new("view")
            .bind("+rotate", "mouse2")?
            .bind("+pan", "Shift+mouse2")?;
        let mut input = InputSystem::new(vec![view]);

        let cmds = input.handle_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert_eq!(cmds[0].name(), "+rotate");
        let cmds = input.handle_mouse_button(MouseButton::Middle, ElementState::Released);
        assert_eq!(cmds[0].name(), "-rotate");

        input.handle_keyboard(VirtualKeyCode::LShift, ElementState::Pressed);
        let cmds = input.handle_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert_eq!(cmds[0].name(), "+pan");
        Ok(())
    }

    #[test]
    fn test_key_repeat_is_suppressed() -> Result<()> {
        let view = Bindings::new("view").bind("reset-view", "r")?;
        let mut input = InputSystem::new(vec![view]);

        let cmds = input.handle_keyboard(VirtualKeyCode::R, ElementState::Pressed);
        assert_eq!(cmds.len(), 1);
        let cmds = input.handle_keyboard(VirtualKeyCode::R, ElementState::Pressed);
        assert!(cmds.is_empty());
        input.handle_keyboard(VirtualKeyCode::R, ElementState::Released);
        let cmds = input.handle_keyboard(VirtualKeyCode::R, ElementState::Pressed);
        assert_eq!(cmds.len(), 1);
        Ok(())
    }

    #[test]
    fn test_last_pushed_bindings_win() -> Result<()> {
        let base = Bindings::new("base").bind("fire", "mouse1")?;
        let overlay = Bindings::new("overlay").bind("click", "mouse1")?;
        let mut input = InputSystem::new(vec![base]);
        input.push_bindings(overlay);

        let cmds = input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(cmds[0].name(), "click");

        input.handle_mouse_button(MouseButton::Left, ElementState::Released);
        input.pop_bindings();
        let cmds = input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(cmds[0].name(), "fire");
        Ok(())
    }
}
