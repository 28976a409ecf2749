//! Colour theme for the player and CLI output.
//!
//! Colours are held as ratatui [`Color`]s and converted to ANSI escape codes
//! on output, so the player and command handlers share one palette.

use ratatui::style::Color;

/// Colour palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Primary text color (slide content, command output)
    pub text_primary: Color,
    /// Secondary/dimmed text color (hints, separators)
    pub text_secondary: Color,
    /// Accent color (titles, keybindings, progress fill)
    pub accent: Color,
    /// Slide boundary markers on the progress bar
    pub marker: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::chalkboard()
    }
}

impl Theme {
    /// Light gray text with green accents.
    pub fn chalkboard() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            marker: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// White text, yellow accents.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            marker: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            text_secondary: Color::DarkGray,
            accent: Color::LightCyan,
            marker: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Look up a theme by its config name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chalkboard" | "default" => Some(Self::chalkboard()),
            "classic" => Some(Self::classic()),
            "ocean" => Some(Self::ocean()),
            _ => None,
        }
    }

    /// Names accepted by [`Theme::by_name`].
    pub fn names() -> &'static [&'static str] {
        &["chalkboard", "classic", "ocean"]
    }

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }
}

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
}

/// Convert a ratatui Color to an ANSI foreground escape code.
pub fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB and indexed colors render uncoloured
        _ => "",
    }
}

/// Theme named in the user config, or the default.
pub fn current_theme() -> Theme {
    crate::Config::load()
        .ok()
        .and_then(|config| Theme::by_name(&config.ui.theme))
        .unwrap_or_default()
}
