//! Header and slide body.
//!
//! Slide content is light markdown: `#` headings, `-`/`*` bullets, `>`
//! quotes, fenced code and `**bold**`. It is laid out into terminal-width
//! lines here, then drawn with a scroll offset.

use std::io::Write;

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::lesson::{FrameSequence, Lesson};
use crate::theme::{color_to_ansi, Theme, ANSI_RESET};

const BOLD: &str = "\x1b[1m";

/// How a laid-out line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Text,
    Bullet,
    Quote,
    Code,
}

/// One terminal line of slide content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub kind: LineKind,
    pub text: String,
}

impl ContentLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Cut `text` to at most `width` columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        // Hard-split an overlong word
        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }
    if current_width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn strip_inline(text: &str) -> String {
    text.replace("**", "").replace("__", "").replace('`', "")
}

/// Lay out a slide (emoji + title, blank line, content) for `width` columns.
pub fn layout_slide(emoji: Option<&str>, title: &str, content: &str, width: usize) -> Vec<ContentLine> {
    let width = width.max(4);
    let mut lines = Vec::new();

    let heading = match emoji {
        Some(e) if !e.is_empty() => format!("{} {}", e, title),
        _ => title.to_string(),
    };
    for line in wrap_text(&heading, width) {
        lines.push(ContentLine::new(LineKind::Title, line));
    }
    lines.push(ContentLine::new(LineKind::Text, ""));

    let mut in_code = false;
    for raw in content.lines() {
        let trimmed = raw.trim_end();
        if trimmed.trim_start().starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            lines.push(ContentLine::new(
                LineKind::Code,
                truncate_to_width(&format!("  {}", trimmed), width),
            ));
            continue;
        }

        let line = trimmed.trim_start();
        if line.is_empty() {
            lines.push(ContentLine::new(LineKind::Text, ""));
        } else if line.starts_with('#') {
            let text = strip_inline(line.trim_start_matches('#').trim());
            for l in wrap_text(&text, width) {
                lines.push(ContentLine::new(LineKind::Heading, l));
            }
        } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            push_prefixed(&mut lines, LineKind::Bullet, "• ", "  ", rest, width);
        } else if let Some(rest) = line.strip_prefix('>') {
            push_prefixed(&mut lines, LineKind::Quote, "│ ", "│ ", rest.trim_start(), width);
        } else {
            for l in wrap_text(&strip_inline(line), width) {
                lines.push(ContentLine::new(LineKind::Text, l));
            }
        }
    }
    lines
}

fn push_prefixed(
    lines: &mut Vec<ContentLine>,
    kind: LineKind,
    first: &str,
    rest: &str,
    text: &str,
    width: usize,
) {
    let inner = width.saturating_sub(first.width()).max(1);
    for (i, l) in wrap_text(&strip_inline(text), inner).into_iter().enumerate() {
        let prefix = if i == 0 { first } else { rest };
        lines.push(ContentLine::new(kind, format!("{}{}", prefix, l)));
    }
}

/// Header line text: lecture number and title, slide counter on the right.
pub fn header_text(lesson: &Lesson, current: usize, width: usize) -> String {
    let counter = format!("{}/{} ", current + 1, lesson.frame_count());
    let left = match &lesson.emoji {
        Some(e) => format!(" {} Lecture {}: {}", e, lesson.order, lesson.title),
        None => format!(" Lecture {}: {}", lesson.order, lesson.title),
    };
    let room = width.saturating_sub(counter.width() + 1);
    let left = truncate_to_width(&left, room);
    let gap = width.saturating_sub(left.width() + counter.width());
    format!("{}{}{}", left, " ".repeat(gap), counter)
}

/// Draw the header (title bar + separator).
pub fn render_header(
    out: &mut impl Write,
    theme: &Theme,
    lesson: &Lesson,
    current: usize,
    width: u16,
) -> Result<()> {
    let text = header_text(lesson, current, width as usize);
    write!(
        out,
        "\x1b[1;1H\x1b[2K{}{}{}{}",
        BOLD,
        color_to_ansi(theme.accent),
        text,
        ANSI_RESET
    )?;
    Ok(())
}

/// Draw the current slide's content rows starting at `top`.
///
/// Returns the total number of laid-out lines so the caller can bound
/// scrolling.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    out: &mut impl Write,
    theme: &Theme,
    lesson: &Lesson,
    index: usize,
    width: u16,
    top: u16,
    rows: usize,
    scroll: usize,
) -> Result<usize> {
    let Some(slide) = lesson.slide(index) else {
        return Ok(0);
    };
    let lines = layout_slide(
        lesson.slide_emoji(index),
        &slide.title,
        &slide.content,
        (width as usize).saturating_sub(4),
    );

    for row in 0..rows {
        write!(out, "\x1b[{};1H\x1b[2K", top as usize + row + 1)?;
        if let Some(line) = lines.get(scroll + row) {
            let style = match line.kind {
                LineKind::Title => format!("{}{}", BOLD, color_to_ansi(theme.accent)),
                LineKind::Heading => format!("{}{}", BOLD, color_to_ansi(theme.text_primary)),
                LineKind::Quote | LineKind::Code => color_to_ansi(theme.text_secondary).to_string(),
                LineKind::Text | LineKind::Bullet => color_to_ansi(theme.text_primary).to_string(),
            };
            write!(out, "  {}{}{}", style, line.text, ANSI_RESET)?;
        }
    }
    Ok(lines.len())
}
