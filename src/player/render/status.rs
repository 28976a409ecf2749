//! Status bar and separators.
//!
//! Shows play state, timing mode, slide progress, warnings and key hints.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::engine::{Mode, Snapshot};
use crate::theme::{color_to_ansi, Theme, ANSI_RESET};

/// Render a separator line.
pub fn render_separator_line(out: &mut impl Write, theme: &Theme, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!(
        "\x1b[{};1H{}",
        row + 1,
        color_to_ansi(theme.text_secondary)
    ));
    for _ in 0..width {
        output.push('─');
    }
    output.push_str(ANSI_RESET);
    write!(out, "{}", output)?;
    Ok(())
}

/// Builds a status line while tracking its visible width.
struct Segments<'a> {
    theme: &'a Theme,
    output: String,
    visible: usize,
}

impl<'a> Segments<'a> {
    fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            output: String::with_capacity(256),
            visible: 0,
        }
    }

    fn push(&mut self, color: ratatui::style::Color, text: &str) {
        self.output.push_str(color_to_ansi(color));
        self.output.push_str(text);
        self.visible += text.width();
    }

    fn key(&mut self, key: &str, action: &str) {
        self.push(self.theme.accent, key);
        self.push(self.theme.text_secondary, action);
    }
}

/// Plain-text description of the playback state (no colour).
pub fn state_label(snapshot: &Snapshot, complete: bool) -> String {
    if complete {
        return "✓ complete".to_string();
    }
    if snapshot.unavailable {
        return "⚠ narration unavailable".to_string();
    }
    let mode = match snapshot.mode {
        Mode::NarrationTimed => "♪ narr",
        Mode::FallbackTimed => "⏱ timed",
    };
    format!("{} {:>3}%", mode, (snapshot.progress * 100.0).round() as u32)
}

/// Render the status/controls bar.
pub fn render_status_bar(
    out: &mut impl Write,
    theme: &Theme,
    width: u16,
    row: u16,
    snapshot: &Snapshot,
    complete: bool,
) -> Result<()> {
    let mut line = Segments::new(theme);

    let icon = if snapshot.is_playing { " ⏸ " } else { " ▶ " };
    line.push(theme.text_primary, icon);

    let label = state_label(snapshot, complete);
    let label_color = if complete {
        theme.success
    } else if snapshot.unavailable {
        theme.error
    } else {
        theme.text_primary
    };
    line.push(label_color, &label);
    line.push(theme.text_secondary, " │ ");

    let play_action = if snapshot.is_playing { ":pause " } else { ":play " };
    line.key("space", play_action);
    line.key("←/→", ":slide ");
    line.key("r", ":rst ");
    line.key("?", ":hlp ");
    line.key("q", ":quit");

    // Pad to full width to overwrite leftover content
    let padding = (width as usize).saturating_sub(line.visible);
    let mut output = format!("\x1b[{};1H", row + 1);
    output.push_str(&line.output);
    output.push_str(&" ".repeat(padding));
    output.push_str(ANSI_RESET);
    write!(out, "{}", output)?;

    Ok(())
}
