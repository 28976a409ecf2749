//! Rendering components for the lecture player.
//!
//! Screen layout, top to bottom: header, separator, slide content,
//! separator, lesson progress bar, status bar.

mod help;
mod progress;
mod slide;
mod status;

pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use progress::{
    bar_width, build_progress_bar_chars, format_duration, render_progress_bar,
    PROGRESS_CHROME_COLS,
};
pub use slide::{
    header_text, layout_slide, render_header, render_slide, truncate_to_width, wrap_text,
    ContentLine, LineKind,
};
pub use status::{render_separator_line, render_status_bar, state_label};

use std::io::Write;

use anyhow::Result;

use crate::engine::PlaybackEngine;
use crate::lesson::{FrameSequence, Lesson};
use crate::player::state::{MarkerPosition, ViewState};
use crate::theme::Theme;

/// Draw the whole player screen.
pub fn render_screen(
    out: &mut impl Write,
    theme: &Theme,
    state: &mut ViewState,
    engine: &PlaybackEngine<Lesson>,
    markers: &[MarkerPosition],
) -> Result<()> {
    let width = state.term_cols;
    let rows = state.term_rows;

    if state.show_help {
        render_help(out, theme, width, rows)?;
        out.flush()?;
        return Ok(());
    }

    let lesson = engine.frames();
    let snapshot = engine.snapshot();
    state.follow_slide(snapshot.current_frame);

    render_header(out, theme, lesson, snapshot.current_frame, width)?;
    render_separator_line(out, theme, width, 1)?;

    let lines = render_slide(
        out,
        theme,
        lesson,
        snapshot.current_frame,
        width,
        ViewState::HEADER_LINES,
        state.view_rows,
        state.scroll_offset,
    )?;
    state.set_content_lines(lines);

    let total = lesson.total_nominal_ms() as f64 / 1000.0;
    let current = engine.lesson_progress() * total;
    render_separator_line(out, theme, width, rows.saturating_sub(3))?;
    render_progress_bar(out, theme, width, state.progress_row(), current, total, markers)?;
    render_status_bar(
        out,
        theme,
        width,
        rows.saturating_sub(1),
        &snapshot,
        engine.is_complete(),
    )?;

    out.flush()?;
    Ok(())
}
