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
use anyhow::{bail, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum CommandArg {
    None,
    Boolean(bool),
    Float(f64),
    Displacement((f64, f64)),
}

impl From<bool> for CommandArg {
    fn from(v: bool) -> Self {
        CommandArg::Boolean(v)
    }
}

impl From<f64> for CommandArg {
    fn from(v: f64) -> Self {
        CommandArg::Float(v)
    }
}

impl From<(f64, f64)> for CommandArg {
    fn from(v: (f64, f64)) -> Self {
        CommandArg::Displacement(v)
    }
}

impl From<(f32, f32)> for CommandArg {
    fn from(v: (f32, f32)) -> Self {
        CommandArg::Displacement((f64::from(v.0), f64::from(v.1)))
    }
}

/// A named command, optionally carrying one argument. The typed accessors
/// fail when the argument is of a different kind than the consumer
/// expects, which points straight at a mismatched binding.
#[derive(Clone, Debug)]
pub struct Command {
    name: String,
    arg: CommandArg,
}

impl Command {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            arg: CommandArg::None,
        }
    }

    pub fn with_arg<S: Into<String>, A: Into<CommandArg>>(name: S, arg: A) -> Self {
        Self {
            name: name.into(),
            arg: arg.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg(&self) -> &CommandArg {
        &self.arg
    }

    pub fn boolean(&self) -> Result<bool> {
        match self.arg {
            CommandArg::Boolean(v) => Ok(v),
            ref arg => bail!("{} does not carry a boolean argument: {:?}", self.name, arg),
        }
    }

    pub fn float(&self) -> Result<f64> {
        match self.arg {
            CommandArg::Float(v) => Ok(v),
            ref arg => bail!("{} does not carry a float argument: {:?}", self.name, arg),
        }
    }

    pub fn displacement(&self) -> Result<(f64, f64)> {
        match self.arg {
            CommandArg::Displacement(v) => Ok(v),
            ref arg => bail!(
                "{} does not carry a displacement argument: {:?}",
                self.name,
                arg
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accessors_check_the_arg_kind() {
        let cmd = Command::with_arg("mouse-move", (1.0, 2.0));
        assert_eq!(cmd.displacement().unwrap(), (1.0, 2.0));
        assert!(cmd.float().is_err());
        assert!(cmd.boolean().is_err());

        let cmd = Command::new("reset-view");
        assert_eq!(*cmd.arg(), CommandArg::None);
        assert!(cmd.displacement().is_err());
    }

    #[test]
    fn test_accessor_errors_name_the_command() {
        let cmd = Command::with_arg("window-focus", true);
        assert!(cmd.boolean().unwrap());
        let err = cmd.float().unwrap_err();
        assert!(format!("{}", err).contains("window-focus"));
    }
}
