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
use crate::{Command, Key, KeySet};
use anyhow::Result;
use smallvec::{smallvec, SmallVec};
use std::{cmp::Reverse, collections::HashMap};
use winit::event::ElementState;

/// A named set of key-chord to command mappings. Pressing the last key of
/// a chord fires its command; for stateful (`+`-prefixed) commands,
/// releasing any key of the chord fires the matching `-` command.
pub struct Bindings {
    pub name: String,
    // Chords keyed by their activating (last) key, longest chord first.
    press_chords: HashMap<Key, Vec<(KeySet, String)>>,
    release_commands: HashMap<Key, Vec<String>>,
}

impl Bindings {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            press_chords: HashMap::new(),
            release_commands: HashMap::new(),
        }
    }

    pub fn bind(mut self, command: &str, keyset: &str) -> Result<Self> {
        let release = command.strip_prefix('+').map(|stem| format!("-{}", stem));
        for ks in KeySet::from_virtual(keyset)? {
            if let Some(ref release) = release {
                // Register on every chord key, so releasing a modifier
                // also ends the gesture. Mirrored modifier expansions
                // share keys; only record each command once.
                for key in &ks.keys {
                    let commands = self.release_commands.entry(*key).or_default();
                    if !commands.contains(release) {
                        commands.push(release.clone());
                    }
                }
            }

            let chords = self.press_chords.entry(ks.activating()).or_default();
            chords.push((ks, command.to_owned()));
            chords.sort_by_key(|(chord, _)| Reverse(chord.keys.len()));
        }
        Ok(self)
    }

    pub fn match_key(
        &self,
        key: Key,
        state: ElementState,
        key_states: &HashMap<Key, ElementState>,
    ) -> SmallVec<[Command; 4]> {
        if state == ElementState::Released {
            return self
                .release_commands
                .get(&key)
                .map(|commands| commands.iter().map(|name| Command::new(name.as_str())).collect())
                .unwrap_or_default();
        }

        // Longest chord first, so Shift+mouse2 outranks bare mouse2.
        let matched = self.press_chords.get(&key).and_then(|chords| {
            chords
                .iter()
                .find(|(chord, _)| Self::chord_is_pressed(chord, key_states))
        });
        match matched {
            Some((_, command)) => smallvec![Command::new(command.as_str())],
            None => smallvec![],
        }
    }

    fn chord_is_pressed(chord: &KeySet, key_states: &HashMap<Key, ElementState>) -> bool {
        chord
            .keys
            .iter()
            .all(|key| key_states.get(key) == Some(&ElementState::Pressed))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use winit::event::VirtualKeyCode;

    fn pressed(keys: &[Key]) -> HashMap<Key, ElementState> {
        keys.iter().map(|k| (*k, ElementState::Pressed)).collect()
    }

    #[test]
    fn test_simple_binding_matches_on_press() -> Result<()> {
        let bindings = Bindings::new("test").bind("reset-view", "r")?;
        let r = Key::Virtual(VirtualKeyCode::R);
        let commands = bindings.match_key(r, ElementState::Pressed, &pressed(&[r]));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "reset-view");
        Ok(())
    }

    #[test]
    fn test_stateful_binding_releases() -> Result<()> {
        let bindings = Bindings::new("test").bind("+rotate", "mouse2")?;
        let btn = Key::MouseButton(2);
        let commands = bindings.match_key(btn, ElementState::Pressed, &pressed(&[btn]));
        assert_eq!(commands[0].name(), "+rotate");
        let commands = bindings.match_key(btn, ElementState::Released, &HashMap::new());
        assert_eq!(commands[0].name(), "-rotate");
        Ok(())
    }

    #[test]
    fn test_longer_chord_wins() -> Result<()> {
        let bindings = Bindings::new("test")
            .bind("+rotate", "mouse2")?
            .bind("+pan", "Shift+mouse2")?;
        let btn = Key::MouseButton(2);
        let shift = Key::Virtual(VirtualKeyCode::LShift);

        let commands = bindings.match_key(btn, ElementState::Pressed, &pressed(&[btn]));
        assert_eq!(commands[0].name(), "+rotate");

        let commands = bindings.match_key(btn, ElementState::Pressed, &pressed(&[shift, btn]));
        assert_eq!(commands[0].name(), "+pan");
        Ok(())
    }

    #[test]
    fn test_release_covers_every_chord_key() -> Result<()> {
        let bindings = Bindings::new("test").bind("+pan", "Shift+mouse2")?;
        // Releasing the modifier must also end the pan, and the shared
        // mouse2 key must not pick up a duplicate from the L/R expansion.
        let shift = Key::Virtual(VirtualKeyCode::LShift);
        let commands = bindings.match_key(shift, ElementState::Released, &HashMap::new());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "-pan");

        let commands = bindings.match_key(Key::MouseButton(2), ElementState::Released, &HashMap::new());
        assert_eq!(commands.len(), 1);
        Ok(())
    }

    #[test]
    fn test_bind_rejects_unknown_key_names() {
        assert!(Bindings::new("test").bind("fire", "bogus").is_err());
        assert!(Bindings::new("test").bind("+pan", "Shift+bogus").is_err());
    }
}
