//! Engine construction for the terminal hosts.
//!
//! Picks the narration source and fallback clock from the options and
//! returns an idle engine positioned at the start slide.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::clock::{DisabledClock, PresentationClock, ThreadClock};
use crate::config::Config;
use crate::engine::PlaybackEngine;
use crate::lesson::Lesson;
use crate::narration::tools::detect_tool;
use crate::narration::{AudioResolver, NarrationSource, ProcessNarration, Silent};
use crate::theme::Theme;

/// How a lesson is played.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub audio_dir: PathBuf,
    pub extension: String,
    /// Use narration files at all
    pub narration: bool,
    /// Player command overriding auto-detection
    pub player: Option<Vec<String>>,
    pub poll_interval: Duration,
    pub probe: bool,
    pub fallback_timer: bool,
    pub tick_interval: Duration,
    pub autoplay: bool,
    /// Zero-based slide to open at
    pub start_slide: usize,
    pub mouse: bool,
    pub theme: Theme,
}

impl PlayOptions {
    /// Options from the user config for a lesson file at `lesson_path`.
    pub fn from_config(config: &Config, lesson_path: &Path) -> Self {
        Self {
            audio_dir: config.narration.audio_dir_for(lesson_path),
            extension: config.narration.extension.clone(),
            narration: config.narration.enabled,
            player: config.narration.player.clone(),
            poll_interval: config.narration.poll_interval(),
            probe: config.narration.probe,
            fallback_timer: config.playback.fallback_timer,
            tick_interval: config.playback.tick_interval(),
            autoplay: config.playback.autoplay,
            start_slide: 0,
            mouse: config.ui.mouse,
            theme: Theme::by_name(&config.ui.theme).unwrap_or_default(),
        }
    }

    pub fn resolver(&self) -> AudioResolver {
        AudioResolver::new(&self.audio_dir, self.extension.as_str())
    }
}

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The last slide finished at least once
    Completed,
    /// The user quit at `slide`
    Quit { slide: usize },
    /// Ctrl-C in headless mode
    Interrupted { slide: usize },
    /// Neither narration nor the fallback timer could run
    Stalled { slide: usize },
}

impl PlaybackOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

fn narration_source(lesson: &Lesson, options: &PlayOptions) -> Box<dyn NarrationSource> {
    if !options.narration {
        return Box::new(Silent);
    }

    let tool = detect_tool(options.player.as_deref());
    match &tool {
        Some(tool) => tracing::info!(player = tool.name(), "narration player"),
        None => tracing::warn!("no audio player found; slides will advance on a timer"),
    }
    Box::new(
        ProcessNarration::new(options.resolver(), tool)
            .with_estimates(&lesson.nominal_durations())
            .with_poll_interval(options.poll_interval)
            .with_probe(options.probe),
    )
}

/// Build an idle engine for `lesson`, positioned at the start slide.
pub fn build_engine(lesson: Lesson, options: &PlayOptions) -> Result<PlaybackEngine<Lesson>> {
    let narration = narration_source(&lesson, options);
    let clock: Box<dyn PresentationClock> = if options.fallback_timer {
        Box::new(ThreadClock)
    } else {
        Box::new(DisabledClock)
    };

    let id = lesson.id.clone();
    let mut engine = PlaybackEngine::new(id.as_str(), lesson, narration, clock)
        .with_context(|| format!("Cannot play {}", id))?
        .with_tick_interval(options.tick_interval);

    if options.start_slide > 0 {
        engine.seek_to_frame(options.start_slide);
    }
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::LessonFormat;

    fn lesson() -> Lesson {
        Lesson::parse_str(
            r#"{"order": 1, "title": "Intro", "slides": [{"title": "a"}, {"title": "b"}]}"#,
            LessonFormat::Json,
            1000,
        )
        .unwrap()
    }

    fn options() -> PlayOptions {
        let mut options = PlayOptions::from_config(&Config::default(), Path::new("/course/l1.json"));
        options.narration = false;
        options
    }

    #[test]
    fn options_follow_config() {
        let options = PlayOptions::from_config(&Config::default(), Path::new("/course/l1.json"));
        assert_eq!(options.audio_dir, PathBuf::from("/course/audio"));
        assert_eq!(options.tick_interval, Duration::from_millis(100));
        assert!(options.autoplay);
        assert_eq!(options.start_slide, 0);
    }

    #[test]
    fn engine_opens_at_clamped_start_slide() {
        let mut opts = options();
        opts.start_slide = 7;
        let engine = build_engine(lesson(), &opts).unwrap();
        assert_eq!(engine.current_frame(), 1);
        assert!(!engine.is_playing());
        assert_eq!(engine.lesson_id(), "lesson1");
    }

    #[test]
    fn disabled_timer_without_narration_is_unavailable() {
        let mut opts = options();
        opts.fallback_timer = false;
        let mut engine = build_engine(lesson(), &opts).unwrap();
        engine.play();
        assert!(engine.snapshot().unavailable);
    }
}
