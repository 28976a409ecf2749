//! Observable engine state and the host-facing observer trait.

/// What is currently driving progress and advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Real narration feedback drives the frame
    NarrationTimed,
    /// A synthetic timer drives the frame
    FallbackTimed,
}

impl Mode {
    /// Short label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NarrationTimed => "narrated",
            Self::FallbackTimed => "timed",
        }
    }
}

/// Snapshot of the session pushed to the host on every state change.
///
/// The shape is identical in both modes; only `mode` differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub current_frame: usize,
    pub is_playing: bool,
    /// Fraction of the current frame completed, always within `[0, 1]`
    pub progress: f64,
    pub mode: Mode,
    /// Neither narration nor the fallback clock could be started
    pub unavailable: bool,
}

/// Receives state changes from the engine.
///
/// Called synchronously from inside engine operations, on the host thread.
pub trait PlaybackObserver {
    fn on_state_change(&mut self, snapshot: &Snapshot);

    /// The last frame finished during autonomous playback.
    fn on_session_complete(&mut self, _snapshot: &Snapshot) {}
}

/// Construction errors. Control operations never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Frame sequence is empty")]
    EmptySequence,

    #[error("Frame {} has a zero nominal duration", .frame + 1)]
    ZeroDuration { frame: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_labels() {
        assert_eq!(Mode::NarrationTimed.label(), "narrated");
        assert_eq!(Mode::FallbackTimed.label(), "timed");
    }

    #[test]
    fn zero_duration_message_is_one_based() {
        let err = EngineError::ZeroDuration { frame: 2 };
        assert_eq!(err.to_string(), "Frame 3 has a zero nominal duration");
    }
}
