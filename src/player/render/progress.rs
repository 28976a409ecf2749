//! Lesson progress bar.
//!
//! Spans the whole lesson by nominal duration, with a ◆ at every slide
//! boundary and the nominal elapsed/total time on the right.

use std::io::Write;

use anyhow::Result;

use crate::player::state::MarkerPosition;
use crate::theme::{color_to_ansi, Theme, ANSI_RESET};

/// Columns used by padding and the time display.
pub const PROGRESS_CHROME_COLS: usize = 14;

/// Format a duration in seconds to MM:SS format.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Width of the bar for a terminal width.
pub fn bar_width(term_cols: u16) -> usize {
    (term_cols as usize).saturating_sub(PROGRESS_CHROME_COLS)
}

/// Build the progress bar character array.
///
/// Returns the bar characters and how many positions are filled.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;
    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    for marker in markers {
        let marker_pos = if total_duration > 0.0 {
            ((marker.time / total_duration) * bar_width as f64) as usize
        } else {
            0
        };
        if marker_pos < bar_width && bar[marker_pos] != '⏺' {
            bar[marker_pos] = '◆';
        }
    }

    (bar, filled)
}

/// Render the progress bar at `row`.
pub fn render_progress_bar(
    out: &mut impl Write,
    theme: &Theme,
    width: u16,
    row: u16,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
) -> Result<()> {
    let bar_width = bar_width(width);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, total_duration, markers);

    let time_display = format!(
        " {}/{}",
        format_duration(current_time),
        format_duration(total_duration)
    );

    let fill = color_to_ansi(theme.accent);
    let marker = color_to_ansi(theme.marker);
    let rest = color_to_ansi(theme.text_secondary);
    let head = color_to_ansi(theme.text_primary);

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H\x1b[2K ", row + 1));

    output.push_str(fill);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            if c == '◆' {
                output.push_str(marker);
                output.push(c);
                output.push_str(fill);
            } else {
                output.push('━');
            }
        } else if i == filled {
            output.push_str(head);
            output.push(c);
        } else if c == '◆' {
            output.push_str(marker);
            output.push(c);
        } else {
            output.push_str(rest);
            output.push(c);
        }
    }

    output.push_str(head);
    output.push_str(&time_display);
    output.push_str(ANSI_RESET);
    write!(out, "{}", output)?;

    Ok(())
}
