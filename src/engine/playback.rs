//! The playback state machine.
//!
//! States are derived from the session rather than stored: `Idle` when not
//! playing, `PlayingNarrated` / `PlayingFallback` depending on the active
//! timing source. Seeking is a single call that tears down the active source
//! before re-entering a state at the new frame.
//!
//! Every acquisition gets a fresh generation. Releasing a source always bumps
//! the generation, so events still in the queue from it are dropped in
//! [`PlaybackEngine::handle`].

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use super::events::{EngineEvent, Generation, Notifier};
use super::state::{EngineError, Mode, PlaybackObserver, Snapshot};
use crate::clock::{CancelHandle, PresentationClock};
use crate::lesson::FrameSequence;
use crate::narration::{NarrationError, NarrationResource, NarrationSource};

/// Default interval between fallback clock ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The single timing source a session may own.
enum TimingSource {
    Narration(Box<dyn NarrationResource>),
    Fallback {
        handle: CancelHandle,
        elapsed_ms: u64,
        total_ms: u64,
    },
}

#[derive(Debug)]
struct Session {
    current_frame: usize,
    is_playing: bool,
    progress: f64,
    mode: Mode,
    unavailable: bool,
    complete: bool,
}

/// Drives one lesson's frames from narration, or from a timer when
/// narration is unavailable.
///
/// The engine is single-threaded. Narration resources and clocks report back
/// through [`Notifier`]s; the host calls [`process_pending`](Self::process_pending)
/// from its event loop to apply those reports.
pub struct PlaybackEngine<F: FrameSequence> {
    lesson_id: String,
    frames: F,
    narration: Box<dyn NarrationSource>,
    clock: Box<dyn PresentationClock>,
    tick_interval: Duration,
    session: Session,
    active: Option<TimingSource>,
    generation: Generation,
    tx: Sender<EngineEvent>,
    rx: Receiver<EngineEvent>,
    observer: Option<Box<dyn PlaybackObserver>>,
    last_snapshot: Snapshot,
    last_failure: Option<NarrationError>,
}

impl<F: FrameSequence> PlaybackEngine<F> {
    /// Create an idle engine at frame 0.
    pub fn new(
        lesson_id: impl Into<String>,
        frames: F,
        narration: Box<dyn NarrationSource>,
        clock: Box<dyn PresentationClock>,
    ) -> Result<Self, EngineError> {
        if frames.frame_count() == 0 {
            return Err(EngineError::EmptySequence);
        }
        if let Some(frame) = (0..frames.frame_count()).find(|&i| frames.nominal_duration_ms(i) == 0)
        {
            return Err(EngineError::ZeroDuration { frame });
        }

        let session = Session {
            current_frame: 0,
            is_playing: false,
            progress: 0.0,
            mode: Mode::NarrationTimed,
            unavailable: false,
            complete: false,
        };
        let (tx, rx) = channel();
        let mut engine = Self {
            lesson_id: lesson_id.into(),
            frames,
            narration,
            clock,
            tick_interval: DEFAULT_TICK_INTERVAL,
            session,
            active: None,
            generation: 0,
            tx,
            rx,
            observer: None,
            last_snapshot: Snapshot {
                current_frame: 0,
                is_playing: false,
                progress: 0.0,
                mode: Mode::NarrationTimed,
                unavailable: false,
            },
            last_failure: None,
        };
        engine.last_snapshot = engine.snapshot();
        Ok(engine)
    }

    /// Set the fallback tick interval (minimum 1 ms).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn PlaybackObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    pub fn current_frame(&self) -> usize {
        self.session.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing
    }

    /// Whether the last frame finished and nothing has been played since.
    pub fn is_complete(&self) -> bool {
        self.session.complete
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Most recent narration failure, cleared when narration starts again.
    pub fn last_failure(&self) -> Option<&NarrationError> {
        self.last_failure.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_frame: self.session.current_frame,
            is_playing: self.session.is_playing,
            progress: self.session.progress,
            mode: self.session.mode,
            unavailable: self.session.unavailable,
        }
    }

    /// Whole-lesson completion, weighting frames by nominal duration.
    pub fn lesson_progress(&self) -> f64 {
        let total = self.frames.total_nominal_ms();
        if total == 0 {
            return 0.0;
        }
        let index = self.session.current_frame;
        let done = self.frames.frame_start_ms(index) as f64
            + self.session.progress * self.frames.nominal_duration_ms(index) as f64;
        (done / total as f64).clamp(0.0, 1.0)
    }

    // === Control operations ===

    /// Start playing the current frame. No-op while already playing.
    pub fn play(&mut self) {
        if self.session.is_playing {
            return;
        }
        if self.session.complete {
            self.session.complete = false;
            self.session.progress = 0.0;
        }

        let resume = match self.session.mode {
            Mode::FallbackTimed => self.session.progress,
            Mode::NarrationTimed => 0.0,
        };
        self.session.is_playing = true;
        self.start_current(resume);
        self.emit();
    }

    /// Stop the active timing source, keeping frame and progress.
    pub fn pause(&mut self) {
        if !self.session.is_playing {
            return;
        }
        self.release();
        self.session.is_playing = false;
        tracing::debug!(frame = self.session.current_frame, "paused");
        self.emit();
    }

    /// Play/pause button.
    pub fn toggle(&mut self) {
        if self.session.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump to frame `index` (clamped). Always releases the active source,
    /// even when `index` is the current frame.
    pub fn seek_to_frame(&mut self, index: usize) {
        let target = index.min(self.frames.frame_count().saturating_sub(1));
        self.release();
        self.session.current_frame = target;
        self.session.progress = 0.0;
        self.session.complete = false;
        tracing::debug!(frame = target, playing = self.session.is_playing, "seek");

        if self.session.is_playing {
            self.start_current(0.0);
        }
        self.emit();
    }

    /// Go to the next frame. Returns false at the last frame.
    pub fn next(&mut self) -> bool {
        let next = self.session.current_frame + 1;
        if next >= self.frames.frame_count() {
            return false;
        }
        self.seek_to_frame(next);
        true
    }

    /// Go to the previous frame. Returns false at the first frame.
    pub fn previous(&mut self) -> bool {
        match self.session.current_frame.checked_sub(1) {
            Some(prev) => {
                self.seek_to_frame(prev);
                true
            }
            None => false,
        }
    }

    pub fn restart(&mut self) {
        self.seek_to_frame(0);
    }

    // === Callbacks ===

    /// Apply every queued timing-source event in arrival order.
    /// Returns how many events were taken from the queue.
    pub fn process_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle(event);
            count += 1;
        }
        count
    }

    /// Apply one event. Events from a released source are dropped.
    pub fn handle(&mut self, event: EngineEvent) {
        if event.generation() != self.generation {
            tracing::trace!(
                event = event.generation(),
                current = self.generation,
                "dropping stale event"
            );
            return;
        }

        let narrating = matches!(self.active, Some(TimingSource::Narration(_)));
        let timed = matches!(self.active, Some(TimingSource::Fallback { .. }));

        match event {
            EngineEvent::Progress { fraction, .. } if narrating => self.report_progress(fraction),
            EngineEvent::Ended { .. } if narrating => self.advance_on_completion(),
            EngineEvent::Error { message, .. } if narrating => {
                self.report_resource_error(message)
            }
            EngineEvent::Tick { .. } if timed => self.report_fallback_tick(),
            event => {
                tracing::trace!(?event, "event does not match the active source");
            }
        }
    }

    fn report_progress(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        self.session.progress = fraction.clamp(0.0, 1.0);
        self.emit();
    }

    fn report_fallback_tick(&mut self) {
        let step = self.tick_ms();
        let mut finished = false;
        if let Some(TimingSource::Fallback {
            elapsed_ms,
            total_ms,
            ..
        }) = self.active.as_mut()
        {
            *elapsed_ms = elapsed_ms.saturating_add(step);
            finished = *elapsed_ms >= *total_ms;
            self.session.progress = (*elapsed_ms as f64 / *total_ms as f64).min(1.0);
        }

        if finished {
            self.advance_on_completion();
        } else {
            self.emit();
        }
    }

    fn report_resource_error(&mut self, message: String) {
        tracing::warn!(
            lesson = %self.lesson_id,
            frame = self.session.current_frame,
            %message,
            "narration failed, switching to timed playback"
        );
        self.last_failure = Some(NarrationError::Runtime(message));
        self.release();
        // Narrated and timed progress are not comparable; start the frame over
        self.session.progress = 0.0;
        if self.session.is_playing {
            self.start_fallback(0.0);
        }
        self.emit();
    }

    fn advance_on_completion(&mut self) {
        self.release();
        let last = self.frames.frame_count().saturating_sub(1);

        if self.session.current_frame >= last {
            self.session.is_playing = false;
            self.session.progress = 1.0;
            self.session.complete = true;
            tracing::info!(lesson = %self.lesson_id, "session complete");
            self.emit();
            let snapshot = self.snapshot();
            if let Some(observer) = self.observer.as_mut() {
                observer.on_session_complete(&snapshot);
            }
            return;
        }

        self.session.current_frame += 1;
        self.session.progress = 0.0;
        tracing::debug!(frame = self.session.current_frame, "advanced");
        if self.session.is_playing {
            self.start_current(0.0);
        }
        self.emit();
    }

    // === Timing sources ===

    /// Acquire a timing source for the current frame: narration first,
    /// then the fallback clock starting at `fallback_from`.
    fn start_current(&mut self, fallback_from: f64) {
        let index = self.session.current_frame;
        let notifier = self.next_notifier();

        let failure = match self.narration.acquire(&self.lesson_id, index) {
            Ok(mut resource) => match resource.play(notifier) {
                Ok(()) => {
                    self.session.mode = Mode::NarrationTimed;
                    self.session.progress = resource.elapsed_fraction().clamp(0.0, 1.0);
                    self.session.unavailable = false;
                    self.last_failure = None;
                    self.active = Some(TimingSource::Narration(resource));
                    tracing::debug!(frame = index, "narration started");
                    return;
                }
                Err(e) => {
                    resource.stop();
                    e
                }
            },
            Err(e) => e,
        };

        if failure.is_missing() {
            tracing::debug!(frame = index, "no narration, using timed playback");
        } else {
            tracing::warn!(frame = index, error = %failure, "narration unavailable");
        }
        self.last_failure = Some(failure);
        self.start_fallback(fallback_from);
    }

    fn start_fallback(&mut self, from: f64) {
        let total_ms = self.frames.nominal_duration_ms(self.session.current_frame);
        let from = from.clamp(0.0, 1.0);
        let notifier = self.next_notifier();

        match self.clock.schedule_tick(self.tick_interval, notifier) {
            Ok(handle) => {
                self.session.mode = Mode::FallbackTimed;
                self.session.progress = from;
                self.session.unavailable = false;
                self.active = Some(TimingSource::Fallback {
                    handle,
                    elapsed_ms: (from * total_ms as f64).round() as u64,
                    total_ms,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "no narration and no fallback clock");
                self.session.is_playing = false;
                self.session.unavailable = true;
            }
        }
    }

    /// Stop and drop the active source, invalidating its pending events.
    fn release(&mut self) {
        match self.active.take() {
            Some(TimingSource::Narration(mut resource)) => resource.stop(),
            Some(TimingSource::Fallback { handle, .. }) => handle.cancel(),
            None => {}
        }
        self.generation += 1;
    }

    fn next_notifier(&mut self) -> Notifier {
        self.generation += 1;
        Notifier::new(self.generation, self.tx.clone())
    }

    fn tick_ms(&self) -> u64 {
        (self.tick_interval.as_millis() as u64).max(1)
    }

    fn emit(&mut self) {
        let snapshot = self.snapshot();
        if snapshot == self.last_snapshot {
            return;
        }
        self.last_snapshot = snapshot;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_state_change(&snapshot);
        }
    }
}

impl<F: FrameSequence> Drop for PlaybackEngine<F> {
    fn drop(&mut self) {
        self.release();
    }
}
