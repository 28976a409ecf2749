//! Help overlay.
//!
//! A centered box listing every keyboard shortcut.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::theme::Theme;

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "",
    "  ╔═══════════════════════════════════════════╗",
    "  ║            Lectern Player Help            ║",
    "  ╠═══════════════════════════════════════════╣",
    "  ║                                           ║",
    "  ║  Playback                                 ║",
    "  ║    Space      Play / Pause                ║",
    "  ║    r          Restart from first slide    ║",
    "  ║                                           ║",
    "  ║  Slides                                   ║",
    "  ║    <-/->      Previous / next slide       ║",
    "  ║    Home/End   First / last slide          ║",
    "  ║    1-9        Jump to slide               ║",
    "  ║    Up/Down    Scroll slide content        ║",
    "  ║    Click      Seek on the progress bar    ║",
    "  ║                                           ║",
    "  ║  General                                  ║",
    "  ║    ?          Show this help              ║",
    "  ║    q / Esc    Quit player                 ║",
    "  ║                                           ║",
    "  ║         Press any key to close            ║",
    "  ╚═══════════════════════════════════════════╝",
    "",
];

/// Width of the help box (for centering calculations).
pub const HELP_BOX_WIDTH: usize = 47;

/// Row at which the help box starts when centered vertically.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = HELP_LINES.len() as u16;
    (term_height.saturating_sub(box_height)) / 2
}

/// Column at which the help box starts when centered horizontally.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Clear the screen and draw the help box.
pub fn render_help(out: &mut impl Write, theme: &Theme, width: u16, height: u16) -> Result<()> {
    let start_row = calc_help_start_row(height);
    let col = calc_help_start_col(width);

    queue!(out, Clear(ClearType::All))?;
    for (i, line) in HELP_LINES.iter().enumerate() {
        queue!(
            out,
            MoveTo(col, start_row + i as u16),
            SetForegroundColor(theme.accent.into()),
            Print(line),
            ResetColor,
        )?;
    }

    Ok(())
}
