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
use anyhow::{bail, ensure, Result};
use smallvec::SmallVec;
use winit::event::VirtualKeyCode;

/// Key names in bindings refer to virtual keycodes; mouse buttons use the
/// X11-style numbering where button 1 is left, 2 middle, and 3 right.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Key {
    Virtual(VirtualKeyCode),
    MouseButton(u32),
}

#[rustfmt::skip]
fn parse_keycode(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    Some(match name.to_ascii_lowercase().as_str() {
        "a" => A, "b" => B, "c" => C, "d" => D, "e" => E, "f" => F,
        "g" => G, "h" => H, "i" => I, "j" => J, "k" => K, "l" => L,
        "m" => M, "n" => N, "o" => O, "p" => P, "q" => Q, "r" => R,
        "s" => S, "t" => T, "u" => U, "v" => V, "w" => W, "x" => X,
        "y" => Y, "z" => Z,
        "key1" => Key1, "key2" => Key2, "key3" => Key3, "key4" => Key4,
        "key5" => Key5, "key6" => Key6, "key7" => Key7, "key8" => Key8,
        "key9" => Key9, "key0" => Key0,
        "f1" => F1, "f2" => F2, "f3" => F3, "f4" => F4, "f5" => F5,
        "f6" => F6, "f7" => F7, "f8" => F8, "f9" => F9, "f10" => F10,
        "f11" => F11, "f12" => F12,
        "escape" => Escape,
        "insert" => Insert, "home" => Home, "delete" => Delete,
        "end" => End, "pagedown" => PageDown, "pageup" => PageUp,
        "left" => Left, "up" => Up, "right" => Right, "down" => Down,
        "back" => Back, "return" => Return, "space" => Space, "tab" => Tab,
        "lalt" => LAlt, "ralt" => RAlt,
        "lcontrol" => LControl, "rcontrol" => RControl,
        "lshift" => LShift, "rshift" => RShift,
        "lwin" => LWin, "rwin" => RWin,
        "minus" => Minus, "equals" => Equals, "plus" => Plus,
        "numpadadd" => NumpadAdd, "numpadsubtract" => NumpadSubtract,
        "numpadmultiply" => NumpadMultiply, "numpaddivide" => NumpadDivide,
        "numpadenter" => NumpadEnter, "numpaddecimal" => NumpadDecimal,
        "numpad0" => Numpad0, "numpad1" => Numpad1, "numpad2" => Numpad2,
        "numpad3" => Numpad3, "numpad4" => Numpad4, "numpad5" => Numpad5,
        "numpad6" => Numpad6, "numpad7" => Numpad7, "numpad8" => Numpad8,
        "numpad9" => Numpad9,
        "apostrophe" => Apostrophe, "backslash" => Backslash,
        "comma" => Comma, "grave" => Grave,
        "lbracket" => LBracket, "rbracket" => RBracket,
        "period" => Period, "semicolon" => Semicolon, "slash" => Slash,
        _ => return None,
    })
}

impl Key {
    pub fn from_virtual(s: &str) -> Result<Self> {
        if let Some(code) = parse_keycode(s) {
            return Ok(Key::Virtual(code));
        }
        if s.len() > 5 && s[0..5].eq_ignore_ascii_case("mouse") {
            let button = s[5..].parse::<u32>()?;
            return Ok(Key::MouseButton(button));
        }
        bail!("unknown virtual keycode: {}", s)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct KeySet {
    pub keys: SmallVec<[Key; 2]>,
}

impl KeySet {
    /// Parse a `+`-joined chord such as `LControl+Space`. The bare
    /// modifier names `Shift`/`Control`/`Alt`/`Win` stand for either of
    /// their left/right keys and expand combinatorially, so one chord
    /// string can yield several concrete keysets. An unknown key name
    /// fails the whole chord; a silently dropped key would leave a chord
    /// that fires on less input than the binding asked for.
    pub fn from_virtual(keyset: &str) -> Result<Vec<Self>> {
        let mut out = vec![SmallVec::<[Key; 2]>::new()];
        for keyname in keyset.split('+') {
            if is_mirror_modifier(keyname) {
                let mut expanded = Vec::new();
                for mut tmp in out.drain(..) {
                    let mut cpy = tmp.clone();
                    tmp.push(Key::from_virtual(&format!("L{}", keyname))?);
                    cpy.push(Key::from_virtual(&format!("R{}", keyname))?);
                    expanded.push(tmp);
                    expanded.push(cpy);
                }
                out = expanded;
            } else {
                let key = Key::from_virtual(keyname)?;
                for tmp in &mut out {
                    tmp.push(key);
                }
            }
        }
        ensure!(!out.is_empty(), "no key matching {}", keyset);
        Ok(out.drain(..).map(|v| Self { keys: v }).collect::<Vec<_>>())
    }

    // Get the activating key in the keyset.
    pub fn activating(&self) -> Key {
        assert!(!self.keys.is_empty());
        *self.keys.last().unwrap()
    }
}

fn is_mirror_modifier(name: &str) -> bool {
    ["shift", "control", "alt", "win"].contains(&name.to_ascii_lowercase().as_str())
}
