//! Synchronized narration playback engine.
//!
//! Couples a narration clock to a [`FrameSequence`](crate::lesson::FrameSequence)
//! and advances through it autonomously once playing:
//!
//! - `events`: generation-tagged callbacks from timing sources
//! - `state`: snapshot, mode and observer types
//! - `playback`: the [`PlaybackEngine`] state machine

mod events;
mod playback;
mod state;

pub use events::{EngineEvent, Generation, Notifier};
pub use playback::{PlaybackEngine, DEFAULT_TICK_INTERVAL};
pub use state::{EngineError, Mode, PlaybackObserver, Snapshot};
