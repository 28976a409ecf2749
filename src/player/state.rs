//! Player view state
//!
//! Holds everything the terminal host tracks besides the engine itself:
//! terminal size, overlays, content scrolling and the redraw flag.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running
    Continue,
    /// Exit the player
    Quit,
}

/// A slide boundary on the lesson-wide progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPosition {
    /// Nominal time (seconds) at which the slide starts
    pub time: f64,
    /// Slide title
    pub label: String,
}

/// View state for the interactive player.
#[derive(Debug)]
pub struct ViewState {
    /// Whether the help overlay is visible
    pub show_help: bool,

    // === Terminal ===
    pub term_cols: u16,
    pub term_rows: u16,
    /// Rows available for slide content
    pub view_rows: usize,

    // === Content scrolling ===
    /// First visible content line
    pub scroll_offset: usize,
    /// Total wrapped content lines of the current slide
    pub content_lines: usize,
    /// Slide the scroll offset belongs to
    pub scroll_slide: usize,

    /// True when the screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewState {
    /// Header lines (title bar + separator)
    pub const HEADER_LINES: u16 = 2;
    /// Footer lines (separator + progress + status bar)
    pub const STATUS_LINES: u16 = 3;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            term_cols,
            term_rows,
            view_rows: Self::content_rows(term_rows),
            scroll_offset: 0,
            content_lines: 0,
            scroll_slide: 0,
            needs_render: true,
        }
    }

    fn content_rows(term_rows: u16) -> usize {
        term_rows.saturating_sub(Self::HEADER_LINES + Self::STATUS_LINES) as usize
    }

    /// Row of the lesson progress bar (0-indexed).
    pub fn progress_row(&self) -> u16 {
        self.term_rows.saturating_sub(2)
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        self.view_rows = Self::content_rows(rows);
        self.clamp_scroll();
        self.needs_render = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
            self.needs_render = true;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.max_scroll() {
            self.scroll_offset += 1;
            self.needs_render = true;
        }
    }

    /// Reset scrolling when the engine moves to another slide.
    pub fn follow_slide(&mut self, slide: usize) {
        if slide != self.scroll_slide {
            self.scroll_slide = slide;
            self.scroll_offset = 0;
            self.needs_render = true;
        }
    }

    /// Record the wrapped content height of the slide being drawn.
    pub fn set_content_lines(&mut self, lines: usize) {
        self.content_lines = lines;
        self.clamp_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.content_lines.saturating_sub(self.view_rows)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}
