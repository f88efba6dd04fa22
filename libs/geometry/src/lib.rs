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
mod quaternion;
mod vector;

pub use crate::{quaternion::Quaternion, vector::Vec3};

/// Shared degeneracy tolerance. Norms below this are treated as zero and
/// the corresponding operation degrades to a no-op or identity instead of
/// dividing by (nearly) nothing.
pub const TOLERANCE: f64 = 1e-3;
