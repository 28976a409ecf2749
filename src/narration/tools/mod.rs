//! Platform-specific audio players.

mod afplay;
mod custom;
mod ffplay;
mod mpv;

pub use afplay::Afplay;
pub use custom::CustomPlayer;
pub use ffplay::Ffplay;
pub use mpv::Mpv;

use super::tool::AudioTool;

/// Get the platform-appropriate players in priority order.
pub fn platform_tools() -> Vec<Box<dyn AudioTool>> {
    #[cfg(target_os = "macos")]
    {
        vec![
            Box::new(Afplay::new()),
            Box::new(Ffplay::new()),
            Box::new(Mpv::new()),
        ]
    }

    #[cfg(not(target_os = "macos"))]
    {
        vec![Box::new(Ffplay::new()), Box::new(Mpv::new())]
    }
}

/// Pick the first available player, preferring a configured custom command.
pub fn detect_tool(custom: Option<&[String]>) -> Option<Box<dyn AudioTool>> {
    if let Some(player) = custom.and_then(CustomPlayer::from_args) {
        if player.is_available() {
            return Some(Box::new(player));
        }
        tracing::warn!(
            program = player.program(),
            "configured narration player not found, trying built-in players"
        );
    }
    platform_tools().into_iter().find(|tool| tool.is_available())
}
