//! Narration sources: where per-slide audio comes from.
//!
//! The engine only sees the [`NarrationSource`] and [`NarrationResource`]
//! traits. This module also provides the on-disk implementation used by the
//! `lectern` binary:
//!
//! - `resolver`: maps `(lesson, slide)` to `audio/<lesson>/slide<N>.<ext>`
//! - `tool` / `tools/`: external audio players (ffplay, mpv, afplay, custom)
//! - `probe`: narration length lookup via ffprobe
//! - `process`: a [`NarrationSource`] that plays files through an [`AudioTool`]

mod error;
mod probe;
mod process;
mod resolver;
mod tool;
pub mod tools;

pub use error::{FailureKind, NarrationError};
pub use probe::probe_duration;
pub use process::{ProcessNarration, ProcessResource};
pub use resolver::AudioResolver;
pub use tool::{AudioMethod, AudioTool, AudioToolError};

use crate::engine::Notifier;

/// A playable narration handle for one frame.
///
/// Owned exclusively by the engine. After `play` succeeds, the resource
/// reports through the notifier: `progress` periodically, then exactly one of
/// `ended` or `error`.
pub trait NarrationResource {
    /// Start playback. A synchronous error means nothing was started.
    fn play(&mut self, notifier: Notifier) -> Result<(), NarrationError>;

    /// Stop playback and detach. Must be idempotent.
    fn stop(&mut self);

    /// Elapsed / duration ratio at the moment playback started.
    fn elapsed_fraction(&self) -> f64 {
        0.0
    }
}

/// Yields narration resources for a lesson's frames.
pub trait NarrationSource {
    fn acquire(
        &mut self,
        lesson_id: &str,
        frame_index: usize,
    ) -> Result<Box<dyn NarrationResource>, NarrationError>;
}

/// A source with no narration at all; every frame falls back to timing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl NarrationSource for Silent {
    fn acquire(
        &mut self,
        lesson_id: &str,
        frame_index: usize,
    ) -> Result<Box<dyn NarrationResource>, NarrationError> {
        Err(NarrationError::Missing {
            lesson: lesson_id.to_string(),
            frame: frame_index,
        })
    }
}
