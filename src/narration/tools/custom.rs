//! User-configured audio player command.

use crate::narration::tool::{binary_exists, AudioMethod, AudioTool};
use std::path::Path;
use std::process::Command;

/// Player given in the config as `player = ["mpg123", "-q"]`.
///
/// The narration file path is appended as the last argument, unless an
/// argument is exactly `{file}`, which is replaced instead.
#[derive(Debug, Clone)]
pub struct CustomPlayer {
    program: String,
    args: Vec<String>,
}

impl CustomPlayer {
    /// Build from a command line; `None` when it is empty.
    pub fn from_args(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AudioTool for CustomPlayer {
    fn method(&self) -> AudioMethod {
        AudioMethod::Custom
    }

    fn is_available(&self) -> bool {
        Path::new(&self.program).is_file() || binary_exists(&self.program)
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        let mut placed = false;
        for arg in &self.args {
            if arg == "{file}" {
                cmd.arg(path);
                placed = true;
            } else {
                cmd.arg(arg);
            }
        }
        if !placed {
            cmd.arg(path);
        }
        cmd
    }
}
