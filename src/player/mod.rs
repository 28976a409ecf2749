//! Terminal hosts for the playback engine
//!
//! The engine never draws; these hosts feed it input and show its state:
//!
//! - `native`: full-screen interactive player (crossterm)
//! - `headless`: line-per-transition output for pipes and scripts
//!
//! # Architecture
//!
//! - `session`: PlayOptions and engine construction
//! - `state`: ViewState and shared types (MarkerPosition, InputResult)
//! - `input/`: Keyboard and mouse input handling
//! - `markers`: slide boundaries on the lesson timeline
//! - `render/`: header, slide body, progress bar, status bar, help
//!
//! # Usage
//!
//! ```no_run
//! use lectern::lesson::Lesson;
//! use lectern::player::{play_headless, PlayOptions};
//! use lectern::Config;
//! use std::path::Path;
//!
//! let path = Path::new("lessons/lesson1.toml");
//! let config = Config::load().unwrap();
//! let lesson = Lesson::load(path, config.playback.default_slide_duration_ms).unwrap();
//! let outcome = play_headless(lesson, &PlayOptions::from_config(&config, path)).unwrap();
//! println!("{:?}", outcome);
//! ```

mod headless;
pub(crate) mod input;
pub mod markers;
mod native;
pub mod render;
mod session;
pub mod state;

pub use headless::{play_headless, HeadlessReporter};
pub use native::play_interactive;
pub use session::{build_engine, PlayOptions, PlaybackOutcome};
pub use state::{InputResult, MarkerPosition, ViewState};
