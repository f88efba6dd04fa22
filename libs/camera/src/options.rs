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

/// Render-mode toggles owned by the session and handed to the renderer
/// each frame; deliberately not process-wide state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    pub shaded: bool,
    pub wireframe: bool,
    pub show_compass: bool,
    pub show_coordinate_system: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shaded: true,
            wireframe: false,
            show_compass: true,
            show_coordinate_system: true,
        }
    }
}
