//! Headless host: plays a lesson without drawing, printing one line per
//! slide or mode change.
//!
//! Used with `--headless` or when stdout is not a terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::engine::{PlaybackObserver, Snapshot};
use crate::lesson::{FrameSequence, Lesson};
use crate::player::render::format_duration;
use crate::player::session::{build_engine, PlayOptions, PlaybackOutcome};

/// Turns engine snapshots into progress lines.
#[derive(Debug)]
pub struct HeadlessReporter {
    lesson_title: String,
    slide_titles: Vec<String>,
    last: Option<(usize, crate::engine::Mode)>,
    warned_unavailable: bool,
}

impl HeadlessReporter {
    pub fn new(lesson: &Lesson) -> Self {
        Self {
            lesson_title: lesson.title.clone(),
            slide_titles: lesson
                .frames()
                .iter()
                .map(|f| f.content.title.clone())
                .collect(),
            last: None,
            warned_unavailable: false,
        }
    }

    /// Line to print for a state change, if any.
    pub fn describe(&mut self, snapshot: &Snapshot) -> Option<String> {
        if snapshot.unavailable {
            if self.warned_unavailable {
                return None;
            }
            self.warned_unavailable = true;
            return Some(format!(
                "⚠ Slide {} cannot advance: no narration and no timer",
                snapshot.current_frame + 1
            ));
        }
        if !snapshot.is_playing {
            return None;
        }

        let key = (snapshot.current_frame, snapshot.mode);
        if self.last == Some(key) {
            return None;
        }
        self.last = Some(key);
        let title = self
            .slide_titles
            .get(snapshot.current_frame)
            .map(String::as_str)
            .unwrap_or("");
        Some(format!(
            "[{}/{}] {} ({})",
            snapshot.current_frame + 1,
            self.slide_titles.len(),
            title,
            snapshot.mode.label()
        ))
    }

    pub fn completion_line(&self) -> String {
        format!("✓ Lesson complete: {}", self.lesson_title)
    }
}

impl PlaybackObserver for HeadlessReporter {
    fn on_state_change(&mut self, snapshot: &Snapshot) {
        if let Some(line) = self.describe(snapshot) {
            println!("{}", line);
        }
    }

    fn on_session_complete(&mut self, _snapshot: &Snapshot) {
        println!("{}", self.completion_line());
    }
}

fn interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
    flag
}

/// Play `lesson` to the end without a UI.
pub fn play_headless(lesson: Lesson, options: &PlayOptions) -> Result<PlaybackOutcome> {
    let interrupted = interrupt_flag();

    println!(
        "▶ Lecture {}: {} ({} slides, {})",
        lesson.order,
        lesson.title,
        lesson.frame_count(),
        format_duration(lesson.total_nominal_ms() as f64 / 1000.0)
    );

    let reporter = HeadlessReporter::new(&lesson);
    let mut engine = build_engine(lesson, options)?.with_observer(Box::new(reporter));
    engine.play();

    let poll = (options.tick_interval / 2).clamp(Duration::from_millis(1), Duration::from_millis(50));
    loop {
        engine.process_pending();

        if engine.is_complete() {
            return Ok(PlaybackOutcome::Completed);
        }
        let slide = engine.current_frame();
        if engine.snapshot().unavailable {
            return Ok(PlaybackOutcome::Stalled { slide });
        }
        if interrupted.load(Ordering::SeqCst) {
            return Ok(PlaybackOutcome::Interrupted { slide });
        }
        thread::sleep(poll);
    }
}
