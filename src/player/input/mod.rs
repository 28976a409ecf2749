//! Input handling for the lecture player.
//!
//! Dispatches crossterm events to the keyboard and mouse handlers.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::{handle_mouse_event, slide_at_column};

use crossterm::event::Event;

use crate::engine::PlaybackEngine;
use crate::lesson::FrameSequence;
use crate::player::state::{InputResult, ViewState};

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event<F: FrameSequence>(
    event: Event,
    state: &mut ViewState,
    engine: &mut PlaybackEngine<F>,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, engine),
        Event::Mouse(mouse) => handle_mouse_event(mouse, state, engine),
        Event::Resize(cols, rows) => {
            state.handle_resize(cols, rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
