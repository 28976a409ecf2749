//! Course directory validation.
//!
//! Parses every lecture file in a directory and reports how much of each
//! lesson has narration on disk. Files are checked in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::lesson::{FrameSequence, Lesson, LessonFormat};
use crate::narration::AudioResolver;

/// Summary of one lecture file that parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonSummary {
    pub id: String,
    pub order: u32,
    pub title: String,
    pub slides: usize,
    pub total_ms: u64,
    /// Slides with a narration file
    pub narrated: usize,
    /// Combined size of the narration files
    pub audio_bytes: u64,
}

impl LessonSummary {
    pub fn is_fully_narrated(&self) -> bool {
        self.narrated == self.slides
    }
}

/// Result of checking one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<LessonSummary, String>,
}

/// Lecture files (`.toml` / `.json`) directly inside `dir`, sorted by name.
pub fn lecture_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && LessonFormat::from_path(path).is_ok())
        .collect();
    files.sort();
    Ok(files)
}

/// Check every lecture file in `dir` against narration under `audio`.
///
/// Reports come back ordered by lesson order; files that failed to parse
/// sort last.
pub fn check_directory(
    dir: &Path,
    audio: &AudioResolver,
    default_slide_ms: u64,
) -> Result<Vec<FileReport>> {
    let files = lecture_files(dir)?;
    tracing::debug!(count = files.len(), dir = %dir.display(), "checking lecture files");

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: summarize(path, audio, default_slide_ms),
        })
        .collect();

    reports.sort_by_key(|r| match &r.outcome {
        Ok(summary) => (0, summary.order, r.path.clone()),
        Err(_) => (1, 0, r.path.clone()),
    });
    Ok(reports)
}

fn summarize(
    path: &Path,
    audio: &AudioResolver,
    default_slide_ms: u64,
) -> Result<LessonSummary, String> {
    let lesson = Lesson::load(path, default_slide_ms).map_err(|e| e.to_string())?;

    let mut narrated = 0;
    let mut audio_bytes = 0;
    for index in 0..lesson.frame_count() {
        if let Ok(file) = audio.resolve(&lesson.id, index) {
            narrated += 1;
            audio_bytes += fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
        }
    }

    Ok(LessonSummary {
        id: lesson.id.clone(),
        order: lesson.order,
        title: lesson.title.clone(),
        slides: lesson.frame_count(),
        total_ms: lesson.total_nominal_ms(),
        narrated,
        audio_bytes,
    })
}

/// Format a byte size as human-readable string.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
