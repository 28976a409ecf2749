//! Info command handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lectern::lesson::{FrameSequence, Lesson};
use lectern::narration::AudioResolver;
use lectern::player::render::format_duration;
use lectern::progress::ProgressStore;
use lectern::theme::{current_theme, Theme};
use lectern::Config;

#[cfg(not(tarpaulin_include))]
pub fn handle(lesson_path: &Path, audio_dir: Option<&PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let lesson = Lesson::load(lesson_path, config.playback.default_slide_duration_ms)
        .with_context(|| format!("Failed to load {}", lesson_path.display()))?;
    let root = audio_dir
        .cloned()
        .unwrap_or_else(|| config.narration.audio_dir_for(lesson_path));
    let resolver = AudioResolver::new(root, config.narration.extension.as_str());
    let theme = current_theme();

    for line in describe(&lesson, &resolver, &theme) {
        println!("{}", line);
    }

    let store = ProgressStore::open_default()?;
    match store.get(&lesson.id) {
        Some(record) => println!(
            "{}",
            theme.success_text(&format!(
                "Completed {} time(s), last on {}",
                record.times_completed,
                record.last_completed.format("%Y-%m-%d %H:%M")
            ))
        ),
        None => println!("{}", theme.secondary_text("Not completed yet")),
    }
    Ok(())
}

/// Lines describing a lesson and its narration coverage.
pub fn describe(lesson: &Lesson, resolver: &AudioResolver, theme: &Theme) -> Vec<String> {
    let mut lines = Vec::new();
    let emoji = lesson.emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default();
    lines.push(theme.accent_text(&format!(
        "{}Lecture {}: {} [{}]",
        emoji, lesson.order, lesson.title, lesson.id
    )));
    if let Some(description) = &lesson.description {
        lines.push(theme.secondary_text(description));
    }
    lines.push(String::new());

    let mut narrated = 0;
    for (index, frame) in lesson.frames().iter().enumerate() {
        let audio = match resolver.resolve(&lesson.id, index) {
            Ok(_) => {
                narrated += 1;
                theme.success_text("♪")
            }
            Err(_) => theme.secondary_text("·"),
        };
        lines.push(format!(
            "  {:>2}. {} {}  {}",
            index + 1,
            audio,
            theme.primary_text(&frame.content.title),
            theme.secondary_text(&format_duration(frame.nominal_duration_ms as f64 / 1000.0)),
        ));
    }

    lines.push(String::new());
    lines.push(theme.primary_text(&format!(
        "{} slides, {} total, narration for {}/{}",
        lesson.frame_count(),
        format_duration(lesson.total_nominal_ms() as f64 / 1000.0),
        narrated,
        lesson.frame_count()
    )));
    lines
}
