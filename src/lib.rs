//! Lectern - narrated slide lectures with audio-synchronized advancement
//!
//! The core is [`engine::PlaybackEngine`], a single-threaded state machine
//! that advances through a lesson's slides as each slide's narration ends,
//! falling back to a timer when narration is missing or fails. The other
//! modules supply its collaborators and the terminal hosts around it.

pub mod check;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod lesson;
pub mod logging;
pub mod narration;
pub mod player;
pub mod progress;
pub mod theme;

pub use config::Config;
pub use engine::{Mode, PlaybackEngine, Snapshot};
pub use lesson::Lesson;
