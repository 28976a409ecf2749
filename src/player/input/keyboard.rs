//! Keyboard input handling for the lecture player.
//!
//! Maps keys to engine controls and view changes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::PlaybackEngine;
use crate::lesson::FrameSequence;
use crate::player::state::{InputResult, ViewState};

/// Handle a keyboard event.
pub fn handle_key_event<F: FrameSequence>(
    key: KeyEvent,
    state: &mut ViewState,
    engine: &mut PlaybackEngine<F>,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // If help is showing, any key closes it
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        KeyCode::Char('?') => {
            state.toggle_help();
            InputResult::Continue
        }

        // === Playback ===
        KeyCode::Char(' ') => {
            engine.toggle();
            InputResult::Continue
        }
        KeyCode::Char('r') => {
            engine.restart();
            InputResult::Continue
        }

        // === Slides ===
        KeyCode::Left => {
            engine.previous();
            InputResult::Continue
        }
        KeyCode::Right => {
            engine.next();
            InputResult::Continue
        }
        KeyCode::Home => {
            engine.seek_to_frame(0);
            InputResult::Continue
        }
        KeyCode::End => {
            engine.seek_to_frame(engine.frame_count().saturating_sub(1));
            InputResult::Continue
        }
        KeyCode::Char(c @ '1'..='9') => {
            let slide = c as usize - '1' as usize;
            if slide < engine.frame_count() {
                engine.seek_to_frame(slide);
            }
            InputResult::Continue
        }

        // === Content scrolling ===
        KeyCode::Up => {
            state.scroll_up();
            InputResult::Continue
        }
        KeyCode::Down => {
            state.scroll_down();
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
