//! Lecture files and the frame sequence they produce.
//!
//! A lecture file is TOML or JSON:
//!
//! ```toml
//! order = 3
//! title = "What Is a Formula?"
//! emoji = "🎯"
//!
//! [[slides]]
//! title = "Parameters"
//! content = "A **parameter** is ..."
//! duration_ms = 15000
//! ```
//!
//! Slides without a duration get a default nominal duration. A lecture with no
//! slides but a top-level `content` becomes a single slide.

mod frame;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use frame::{frames_from_durations, Frame, FrameSequence};

/// Nominal duration for slides that don't declare one.
pub const DEFAULT_SLIDE_DURATION_MS: u64 = 20_000;

/// Nominal duration of the single slide built from a lecture's `content`.
pub const SINGLE_SLIDE_DURATION_MS: u64 = 30_000;

/// Errors that can occur while loading a lecture file.
#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("Failed to read lecture file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported lecture file extension: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid TOML lecture: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON lecture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lecture has no slides and no content")]
    Empty,

    #[error("Slide {slide} has a zero duration")]
    ZeroDuration { slide: usize },
}

/// On-disk lecture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonFormat {
    Toml,
    Json,
}

impl LessonFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, LessonError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(LessonError::UnsupportedFormat(ext)),
        }
    }
}

/// Content of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(
        default,
        alias = "duration",
        alias = "durationMs",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u64>,
}

/// Lecture file as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonFile {
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// A loaded lecture: metadata plus an immutable frame sequence.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub order: u32,
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    frames: Vec<Frame<Slide>>,
}

impl Lesson {
    /// Load a lecture from a `.toml` or `.json` file.
    pub fn load<P: AsRef<Path>>(path: P, default_slide_ms: u64) -> Result<Self, LessonError> {
        let path = path.as_ref();
        let format = LessonFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| LessonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&text, format, default_slide_ms)
    }

    /// Parse lecture text in the given format.
    pub fn parse_str(
        text: &str,
        format: LessonFormat,
        default_slide_ms: u64,
    ) -> Result<Self, LessonError> {
        let file: LessonFile = match format {
            LessonFormat::Toml => toml::from_str(text)?,
            LessonFormat::Json => serde_json::from_str(text)?,
        };
        Self::from_file(file, default_slide_ms)
    }

    /// Build the frame sequence from a parsed lecture file.
    pub fn from_file(file: LessonFile, default_slide_ms: u64) -> Result<Self, LessonError> {
        let slides = if file.slides.is_empty() {
            match &file.content {
                Some(content) if !content.trim().is_empty() => vec![Slide {
                    title: file.title.clone(),
                    content: content.clone(),
                    emoji: file.emoji.clone(),
                    duration_ms: Some(SINGLE_SLIDE_DURATION_MS),
                }],
                _ => return Err(LessonError::Empty),
            }
        } else {
            file.slides
        };

        let frames = slides
            .into_iter()
            .enumerate()
            .map(|(index, slide)| {
                let ms = slide.duration_ms.unwrap_or(default_slide_ms);
                if ms == 0 {
                    return Err(LessonError::ZeroDuration { slide: index + 1 });
                }
                Ok(Frame::new(index, ms, slide))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let id = file
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("lesson{}", file.order));

        Ok(Self {
            order: file.order,
            id,
            title: file.title,
            description: file.description,
            emoji: file.emoji,
            frames,
        })
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame<Slide>] {
        &self.frames
    }

    /// Slide content at `index`.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.frames.get(index).map(|f| &f.content)
    }

    /// Emoji for a slide, falling back to the lecture's own.
    pub fn slide_emoji(&self, index: usize) -> Option<&str> {
        self.slide(index)
            .and_then(|s| s.emoji.as_deref())
            .or(self.emoji.as_deref())
    }

    /// Nominal durations of every slide.
    pub fn nominal_durations(&self) -> Vec<u64> {
        self.frames.iter().map(|f| f.nominal_duration_ms).collect()
    }
}

impl FrameSequence for Lesson {
    type Content = Slide;

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn get_frame(&self, index: usize) -> Option<&Frame<Slide>> {
        self.frames.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_LESSON: &str = r#"
order = 3
title = "What Is a Formula?"
emoji = "🎯"

[[slides]]
title = "Parameters"
content = "A **parameter** is a quantity."
duration_ms = 10000

[[slides]]
title = "Pi"
content = "The number π."
"#;

    #[test]
    fn parses_toml_with_default_duration() {
        let lesson = Lesson::parse_str(TOML_LESSON, LessonFormat::Toml, 20_000).unwrap();
        assert_eq!(lesson.id, "lesson3");
        assert_eq!(lesson.frame_count(), 2);
        assert_eq!(lesson.nominal_durations(), vec![10_000, 20_000]);
        assert_eq!(lesson.slide(1).unwrap().title, "Pi");
    }

    #[test]
    fn parses_json_with_duration_alias() {
        let json = r#"{
            "order": 2,
            "title": "What Is Counting?",
            "slides": [
                {"title": "Group", "content": "...", "emoji": "🖐", "duration": 15000}
            ]
        }"#;
        let lesson = Lesson::parse_str(json, LessonFormat::Json, 20_000).unwrap();
        assert_eq!(lesson.nominal_durations(), vec![15_000]);
        assert_eq!(lesson.slide_emoji(0), Some("🖐"));
    }

    #[test]
    fn content_only_lesson_becomes_single_slide() {
        let toml = "order = 7\ntitle = \"Solo\"\nemoji = \"📖\"\ncontent = \"Body\"\n";
        let lesson = Lesson::parse_str(toml, LessonFormat::Toml, 20_000).unwrap();
        assert_eq!(lesson.frame_count(), 1);
        assert_eq!(lesson.nominal_durations(), vec![SINGLE_SLIDE_DURATION_MS]);
        assert_eq!(lesson.slide(0).unwrap().title, "Solo");
        assert_eq!(lesson.slide_emoji(0), Some("📖"));
    }

    #[test]
    fn empty_lesson_is_rejected() {
        let toml = "order = 1\ntitle = \"Nothing\"\n";
        let err = Lesson::parse_str(toml, LessonFormat::Toml, 20_000).unwrap_err();
        assert!(matches!(err, LessonError::Empty));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let toml = "order = 1\ntitle = \"T\"\n[[slides]]\ntitle = \"a\"\nduration_ms = 0\n";
        let err = Lesson::parse_str(toml, LessonFormat::Toml, 20_000).unwrap_err();
        assert!(matches!(err, LessonError::ZeroDuration { slide: 1 }));
    }

    #[test]
    fn explicit_id_wins() {
        let toml = "order = 1\nid = \"intro\"\ntitle = \"T\"\ncontent = \"x\"\n";
        let lesson = Lesson::parse_str(toml, LessonFormat::Toml, 20_000).unwrap();
        assert_eq!(lesson.id, "intro");
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            LessonFormat::from_path(Path::new("a/b.TOML")).unwrap(),
            LessonFormat::Toml
        );
        assert_eq!(
            LessonFormat::from_path(Path::new("b.json")).unwrap(),
            LessonFormat::Json
        );
        assert!(LessonFormat::from_path(Path::new("b.md")).is_err());
    }

    #[test]
    fn slide_emoji_falls_back_to_lesson() {
        let lesson = Lesson::parse_str(TOML_LESSON, LessonFormat::Toml, 20_000).unwrap();
        assert_eq!(lesson.slide_emoji(0), Some("🎯"));
    }

    #[test]
    fn oversized_durations_do_not_overflow_totals() {
        let json = r#"{"order": 1, "title": "Long", "slides": [
            {"title": "a", "duration_ms": 18446744073709551615},
            {"title": "b", "duration_ms": 5}
        ]}"#;
        let lesson = Lesson::parse_str(json, LessonFormat::Json, 20_000).unwrap();
        assert_eq!(lesson.total_nominal_ms(), u64::MAX);
        assert_eq!(lesson.frame_start_ms(1), u64::MAX);
    }
}
