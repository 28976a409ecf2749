//! macOS afplay audio player.

use crate::narration::tool::{AudioMethod, AudioTool};
use std::path::Path;
use std::process::Command;

/// macOS built-in command line player.
///
/// Ships with every macOS install, so availability is a platform check.
pub struct Afplay;

impl Afplay {
    /// Create a new Afplay tool.
    pub fn new() -> Self {
        Self
    }
}

impl AudioTool for Afplay {
    fn method(&self) -> AudioMethod {
        AudioMethod::Afplay
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new("afplay");
        cmd.arg(path);
        cmd
    }
}

impl Default for Afplay {
    fn default() -> Self {
        Self::new()
    }
}
