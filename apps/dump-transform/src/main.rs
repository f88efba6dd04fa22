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
use anyhow::{anyhow, Result};
use camera::{ArcBallController, RenderOptions};
use input::InputSystem;
use runloop::FramePipeline;
use std::collections::VecDeque;
use structopt::StructOpt;
use winit::event::{ElementState, MouseButton, VirtualKeyCode};

/// Drives bindings -> commands -> controller -> camera from scripted input
/// and prints the resulting transform, standing in for the interactive
/// windowed demo.
#[derive(Debug, StructOpt)]
#[structopt(name = "dump-transform", about = "Drive the arcball camera from scripted input")]
struct Opt {
    #[structopt(short = "W", long = "width", default_value = "800")]
    width: f64,

    #[structopt(short = "H", long = "height", default_value = "600")]
    height: f64,

    /// Scripted middle-button drag, as x1,y1:x2,y2. Repeatable; gestures
    /// play back one per frame in order.
    #[structopt(short = "d", long = "drag")]
    drags: Vec<String>,

    /// Frames to hold the right-arrow yaw nudge.
    #[structopt(long = "yaw-frames", default_value = "0")]
    yaw_frames: u64,

    /// Frames to hold the down-arrow pitch nudge.
    #[structopt(long = "pitch-frames", default_value = "0")]
    pitch_frames: u64,

    /// Press 'r' at the end of the script.
    #[structopt(short = "r", long = "reset")]
    reset: bool,

    /// Also print the projection and model/view matrices.
    #[structopt(short = "m", long = "matrices")]
    matrices: bool,
}

enum ScriptEvent {
    Key(VirtualKeyCode, ElementState),
    Button(MouseButton, ElementState),
    Cursor(f64, f64),
}

struct Session {
    input: InputSystem,
    controller: ArcBallController,
    script: VecDeque<Vec<ScriptEvent>>,
    options: RenderOptions,
}

fn parse_drag(s: &str) -> Result<((f64, f64), (f64, f64))> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("drag must look like x1,y1:x2,y2: {}", s))?;
    Ok((parse_point(from)?, parse_point(to)?))
}

fn parse_point(s: &str) -> Result<(f64, f64)> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("point must look like x,y: {}", s))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

fn build_script(opt: &Opt) -> Result<VecDeque<Vec<ScriptEvent>>> {
    let mut script = VecDeque::new();

    for drag in &opt.drags {
        let (p1, p2) = parse_drag(drag)?;
        // The cursor reaches the press position before the button goes
        // down, as a real device would; moving to p1 with the button
        // already held would rotate on the way in.
        script.push_back(vec![
            ScriptEvent::Cursor(p1.0, p1.1),
            ScriptEvent::Button(MouseButton::Middle, ElementState::Pressed),
            ScriptEvent::Cursor(p2.0, p2.1),
            ScriptEvent::Button(MouseButton::Middle, ElementState::Released),
        ]);
    }

    for (frames, key) in [
        (opt.yaw_frames, VirtualKeyCode::Right),
        (opt.pitch_frames, VirtualKeyCode::Down),
    ] {
        if frames > 0 {
            script.push_back(vec![ScriptEvent::Key(key, ElementState::Pressed)]);
            for _ in 1..frames {
                script.push_back(vec![]);
            }
            script.push_back(vec![ScriptEvent::Key(key, ElementState::Released)]);
        }
    }

    if opt.reset {
        script.push_back(vec![
            ScriptEvent::Key(VirtualKeyCode::R, ElementState::Pressed),
            ScriptEvent::Key(VirtualKeyCode::R, ElementState::Released),
        ]);
    }

    Ok(script)
}

fn new_session(opt: &Opt) -> Result<Session> {
    let mut controller = ArcBallController::new(opt.width, opt.height);
    controller
        .camera_mut()
        .init_projection(45.0, 1.0, 100.0, opt.width / opt.height);
    controller.home();

    Ok(Session {
        input: InputSystem::new(vec![ArcBallController::default_bindings()?]),
        controller,
        script: build_script(opt)?,
        options: RenderOptions::default(),
    })
}

fn run_session(session: &mut Session) -> Result<()> {
    let frames = session.script.len() as u64;

    let mut pipeline = FramePipeline::<Session>::new();
    pipeline.add_stage("input", |session| {
        let events = session.script.pop_front().unwrap_or_default();
        for event in events {
            let commands = match event {
                ScriptEvent::Key(code, state) => session.input.handle_keyboard(code, state),
                ScriptEvent::Button(button, state) => {
                    session.input.handle_mouse_button(button, state)
                }
                ScriptEvent::Cursor(x, y) => session.input.handle_cursor_moved(x, y),
            };
            for command in &commands {
                session.controller.handle_command(command)?;
            }
        }
        Ok(())
    });
    pipeline.add_stage("think", |session| {
        session.controller.think();
        Ok(())
    });

    pipeline.run(session, frames)
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut session = new_session(&opt)?;
    run_session(&mut session)?;

    let xform = session.controller.camera_mut().update()?;
    let (xa, ya, za) = session.controller.camera().euler_angles();
    println!(
        "euler (deg): x={:8.3} y={:8.3} z={:8.3}",
        xa.to_degrees(),
        ya.to_degrees(),
        za.to_degrees()
    );
    let t = xform.translation;
    println!("translation: ({:.3}, {:.3}, {:.3})", t.x, t.y, t.z);
    let s = xform.scaling;
    println!("scale:       ({:.3}, {:.3}, {:.3})", s.x, s.y, s.z);
    println!("options:     {:?}", session.options);

    if opt.matrices {
        println!("projection:{:.4}", xform.projection);
        println!("model view:{:.4}", xform.model_view);
    }

    Ok(())
}
