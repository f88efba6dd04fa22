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
use anyhow::{Context, Result};
use log::trace;

type Stage<S> = Box<dyn FnMut(&mut S) -> Result<()>>;

/// A fixed, ordered frame pipeline over caller-owned session state. Stages
/// are registered by name and run in insertion order every tick; the first
/// failing stage aborts the tick with its name attached to the error.
pub struct FramePipeline<S> {
    stages: Vec<(String, Stage<S>)>,
    frame: u64,
}

impl<S> Default for FramePipeline<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FramePipeline<S> {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            frame: 0,
        }
    }

    pub fn add_stage<F>(&mut self, name: &str, stage: F)
    where
        F: FnMut(&mut S) -> Result<()> + 'static,
    {
        self.stages.push((name.to_owned(), Box::new(stage)));
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn tick(&mut self, state: &mut S) -> Result<()> {
        trace!("frame {}", self.frame);
        for (name, stage) in self.stages.iter_mut() {
            stage(state).with_context(|| format!("pipeline stage failed: {}", name))?;
        }
        self.frame += 1;
        Ok(())
    }

    pub fn run(&mut self, state: &mut S, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.tick(state)?;
        }
        Ok(())
    }
}
