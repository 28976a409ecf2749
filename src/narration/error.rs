//! Narration failure taxonomy.
//!
//! None of these are fatal: the engine recovers from all of them by switching
//! the frame to fallback timing.

/// Why narration is not driving the current frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrationError {
    /// No narration exists for this frame (expected, common)
    #[error("No narration for slide {} of {lesson}", .frame + 1)]
    Missing { lesson: String, frame: usize },

    /// Narration exists but could not be started (no player, spawn failure, ...)
    #[error("Narration could not be started: {0}")]
    AcquisitionFailed(String),

    /// Narration failed after playback began
    #[error("Narration failed during playback: {0}")]
    Runtime(String),
}

/// Coarse classification of a [`NarrationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Missing,
    AcquisitionFailed,
    Runtime,
}

impl NarrationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Missing { .. } => FailureKind::Missing,
            Self::AcquisitionFailed(_) => FailureKind::AcquisitionFailed,
            Self::Runtime(_) => FailureKind::Runtime,
        }
    }

    /// Whether the failure is the ordinary "no audio for this slide" case.
    pub fn is_missing(&self) -> bool {
        self.kind() == FailureKind::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_is_one_based() {
        let err = NarrationError::Missing {
            lesson: "lesson3".to_string(),
            frame: 0,
        };
        assert_eq!(err.to_string(), "No narration for slide 1 of lesson3");
        assert!(err.is_missing());
    }

    #[test]
    fn kinds_map_variants() {
        assert_eq!(
            NarrationError::AcquisitionFailed("x".into()).kind(),
            FailureKind::AcquisitionFailed
        );
        assert_eq!(
            NarrationError::Runtime("x".into()).kind(),
            FailureKind::Runtime
        );
    }
}
