//! Play command handler

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use lectern::cli::PlayArgs;
use lectern::lesson::{FrameSequence, Lesson};
use lectern::player::{play_headless, play_interactive, PlayOptions, PlaybackOutcome};
use lectern::progress::ProgressStore;
use lectern::theme::current_theme;
use lectern::Config;

/// Whether to use the headless host for these arguments.
pub fn is_headless(args: &PlayArgs) -> bool {
    args.headless || !atty::is(atty::Stream::Stdout)
}

/// Merge command-line flags over the config.
fn play_options(args: &PlayArgs, config: &Config) -> PlayOptions {
    let mut options = PlayOptions::from_config(config, &args.lesson);
    if let Some(dir) = &args.audio_dir {
        options.audio_dir = dir.clone();
    }
    if args.no_narration {
        options.narration = false;
    }
    if args.paused {
        options.autoplay = false;
    }
    if let Some(slide) = args.start_slide {
        options.start_slide = (slide - 1) as usize;
    }
    if let Some(ms) = args.tick_ms {
        options.tick_interval = Duration::from_millis(ms);
    }
    options
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let lesson = Lesson::load(&args.lesson, config.playback.default_slide_duration_ms)
        .with_context(|| format!("Failed to load {}", args.lesson.display()))?;
    let options = play_options(args, &config);

    let id = lesson.id.clone();
    let title = lesson.title.clone();
    let slides = lesson.frame_count();
    tracing::info!(lesson = %id, slides, audio = %options.audio_dir.display(), "playing");

    let outcome = if is_headless(args) {
        play_headless(lesson, &options)?
    } else {
        play_interactive(lesson, &options)?
    };

    let theme = current_theme();
    match outcome {
        PlaybackOutcome::Completed => {
            if config.playback.record_progress && !args.no_record {
                record_completion(&id, &title, slides)?;
            }
        }
        PlaybackOutcome::Stalled { slide } => {
            eprintln!(
                "{}",
                theme.error_text(&format!(
                    "Stopped at slide {}: narration and the fallback timer are both unavailable",
                    slide + 1
                ))
            );
            std::process::exit(1);
        }
        PlaybackOutcome::Interrupted { slide } | PlaybackOutcome::Quit { slide } => {
            tracing::info!(slide = slide + 1, "stopped before the end");
        }
    }
    Ok(())
}

fn record_completion(id: &str, title: &str, slides: usize) -> Result<()> {
    let mut store = ProgressStore::open_default()?;
    let record = store.record_completion(id, title, slides, Utc::now());
    tracing::debug!(lesson = id, times = record.times_completed, "recorded completion");
    store.save()
}
