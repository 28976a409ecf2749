//! mpv audio player.

use crate::narration::tool::{binary_exists, AudioMethod, AudioTool};
use std::path::Path;
use std::process::Command;

/// Plays narration with `mpv` (audio only, quiet).
pub struct Mpv;

impl Mpv {
    /// Create a new Mpv tool.
    pub fn new() -> Self {
        Self
    }
}

impl AudioTool for Mpv {
    fn method(&self) -> AudioMethod {
        AudioMethod::Mpv
    }

    fn is_available(&self) -> bool {
        binary_exists("mpv")
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new("mpv");
        cmd.args(["--no-video", "--really-quiet", "--no-terminal"])
            .arg(path);
        cmd
    }
}

impl Default for Mpv {
    fn default() -> Self {
        Self::new()
    }
}
