//! Mouse input handling for the lecture player.
//!
//! A left click on the progress bar seeks to the slide under the cursor.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::engine::PlaybackEngine;
use crate::lesson::FrameSequence;
use crate::player::markers::slide_at_time;
use crate::player::render::bar_width;
use crate::player::state::{InputResult, ViewState};

/// Slide under column `column` of a progress bar, if the column is on it.
///
/// The bar starts at column 1.
pub fn slide_at_column<F: FrameSequence>(frames: &F, term_cols: u16, column: u16) -> Option<usize> {
    let bar_start = 1u16;
    let width = bar_width(term_cols);
    if width == 0 || column < bar_start || column >= bar_start + width as u16 {
        return None;
    }
    let ratio = (column - bar_start) as f64 / width as f64;
    let total = frames.total_nominal_ms() as f64 / 1000.0;
    Some(slide_at_time(frames, ratio * total))
}

/// Handle a mouse event.
pub fn handle_mouse_event<F: FrameSequence>(
    mouse: MouseEvent,
    state: &mut ViewState,
    engine: &mut PlaybackEngine<F>,
) -> InputResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if mouse.row == state.progress_row() => {
            if let Some(slide) = slide_at_column(engine.frames(), state.term_cols, mouse.column) {
                engine.seek_to_frame(slide);
                state.needs_render = true;
            }
        }
        MouseEventKind::ScrollUp => state.scroll_up(),
        MouseEventKind::ScrollDown => state.scroll_down(),
        _ => {}
    }

    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::lesson::frames_from_durations;
    use crate::narration::Silent;
    use crossterm::event::KeyModifiers;

    #[test]
    fn columns_map_to_slides() {
        // 80 columns: bar is 66 wide starting at column 1
        let frames = frames_from_durations(&[1000, 1000]);
        assert_eq!(slide_at_column(&frames, 80, 0), None);
        assert_eq!(slide_at_column(&frames, 80, 1), Some(0));
        assert_eq!(slide_at_column(&frames, 80, 33), Some(0));
        assert_eq!(slide_at_column(&frames, 80, 34), Some(1));
        assert_eq!(slide_at_column(&frames, 80, 66), Some(1));
        assert_eq!(slide_at_column(&frames, 80, 67), None);
    }

    #[test]
    fn click_on_progress_row_seeks() {
        let mut engine = PlaybackEngine::new(
            "lesson1",
            frames_from_durations(&[1000, 1000]),
            Box::new(Silent),
            Box::new(ManualClock::new()),
        )
        .unwrap();
        let mut state = ViewState::new(80, 24);

        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse_event(click(5), &mut state, &mut engine);
        assert_eq!(engine.current_frame(), 0);

        handle_mouse_event(click(state.progress_row()), &mut state, &mut engine);
        assert_eq!(engine.current_frame(), 1);
    }
}
