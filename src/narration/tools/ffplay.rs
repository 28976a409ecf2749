//! FFmpeg ffplay audio player.

use crate::narration::tool::{binary_exists, AudioMethod, AudioTool};
use std::path::Path;
use std::process::Command;

/// Plays narration with `ffplay`, headless, exiting at end of file.
pub struct Ffplay;

impl Ffplay {
    /// Create a new Ffplay tool.
    pub fn new() -> Self {
        Self
    }
}

impl AudioTool for Ffplay {
    fn method(&self) -> AudioMethod {
        AudioMethod::Ffplay
    }

    fn is_available(&self) -> bool {
        binary_exists("ffplay")
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new("ffplay");
        cmd.args(["-nodisp", "-autoexit", "-loglevel", "error"])
            .arg(path);
        cmd
    }
}

impl Default for Ffplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_plays_headless_and_exits() {
        let cmd = Ffplay::new().command(Path::new("slide1.mp3"));
        assert_eq!(cmd.get_program(), "ffplay");
        let args: Vec<_> = cmd.get_args().collect();
        assert!(args.contains(&std::ffi::OsStr::new("-nodisp")));
        assert!(args.contains(&std::ffi::OsStr::new("-autoexit")));
        assert_eq!(args.last().copied(), Some(std::ffi::OsStr::new("slide1.mp3")));
    }
}
