//! AudioTool trait and related error types.

use std::path::Path;
use std::process::{Child, Command, Stdio};

/// An external program that can play one narration file to completion.
///
/// Each implementation wraps a specific player (ffplay, mpv, ...) and knows
/// how to invoke it so that it exits on its own when the file ends.
pub trait AudioTool: Send + Sync {
    /// The method identifier for this tool.
    fn method(&self) -> AudioMethod;

    /// Human-readable name for logs and status lines.
    fn name(&self) -> &'static str {
        self.method().name()
    }

    /// Check if this tool is available on the system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Build the command that plays `path`.
    fn command(&self, path: &Path) -> Command;

    /// Spawn the player for `path`, detached from the terminal's stdio.
    fn spawn(&self, path: &Path) -> Result<Child, AudioToolError> {
        self.command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AudioToolError::NotFound,
                _ => AudioToolError::Failed(e.to_string()),
            })
    }
}

/// Error from a specific tool operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioToolError {
    /// Tool not found on system
    #[error("audio player not found")]
    NotFound,
    /// Tool execution failed
    #[error("{0}")]
    Failed(String),
}

/// Which player is used for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMethod {
    /// FFmpeg's ffplay
    Ffplay,
    /// mpv media player
    Mpv,
    /// macOS afplay
    Afplay,
    /// Command from the config file
    Custom,
}

impl AudioMethod {
    /// Tool name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ffplay => "ffplay",
            Self::Mpv => "mpv",
            Self::Afplay => "afplay",
            Self::Custom => "custom",
        }
    }
}

/// Check if a binary is on the PATH.
pub(crate) fn binary_exists(binary: &str) -> bool {
    Command::new("which")
        .arg(binary)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
