//! Integration tests for the playback engine through its public API

use std::cell::RefCell;
use std::rc::Rc;

use lectern::clock::ManualClock;
use lectern::engine::{Mode, Notifier, PlaybackEngine};
use lectern::lesson::{FrameSequence, Lesson, LessonFormat};
use lectern::narration::{NarrationError, NarrationResource, NarrationSource, Silent};

/// Two slides at the default duration of 1000 ms.
fn lesson() -> Lesson {
    Lesson::parse_str(
        r#"{"order": 1, "title": "Intro", "slides": [{"title": "Hello"}, {"title": "World"}]}"#,
        LessonFormat::Json,
        1_000,
    )
    .unwrap()
}

/// Narration that hands every notifier back to the test.
#[derive(Clone, Default)]
struct Handoff {
    notifiers: Rc<RefCell<Vec<Notifier>>>,
}

struct HandoffResource {
    notifiers: Rc<RefCell<Vec<Notifier>>>,
}

impl NarrationSource for Handoff {
    fn acquire(
        &mut self,
        _lesson_id: &str,
        _frame_index: usize,
    ) -> Result<Box<dyn NarrationResource>, NarrationError> {
        Ok(Box::new(HandoffResource {
            notifiers: Rc::clone(&self.notifiers),
        }))
    }
}

impl NarrationResource for HandoffResource {
    fn play(&mut self, notifier: Notifier) -> Result<(), NarrationError> {
        self.notifiers.borrow_mut().push(notifier);
        Ok(())
    }

    fn stop(&mut self) {}
}

#[test]
fn narration_end_advances_through_lesson() {
    let narration = Handoff::default();
    let notifiers = Rc::clone(&narration.notifiers);
    let mut engine = PlaybackEngine::new(
        "lesson1",
        lesson(),
        Box::new(narration),
        Box::new(ManualClock::new()),
    )
    .unwrap();

    engine.play();
    assert_eq!(engine.snapshot().mode, Mode::NarrationTimed);

    notifiers.borrow()[0].progress(0.5);
    engine.process_pending();
    assert_eq!(engine.snapshot().progress, 0.5);

    notifiers.borrow()[0].ended();
    engine.process_pending();
    assert_eq!(engine.current_frame(), 1);
    assert!(engine.is_playing());

    notifiers.borrow()[1].ended();
    engine.process_pending();
    assert!(engine.is_complete());
    assert!(!engine.is_playing());
    assert_eq!(engine.snapshot().progress, 1.0);
}

#[test]
fn stale_notifier_is_ignored_after_seek() {
    let narration = Handoff::default();
    let notifiers = Rc::clone(&narration.notifiers);
    let mut engine = PlaybackEngine::new(
        "lesson1",
        lesson(),
        Box::new(narration),
        Box::new(ManualClock::new()),
    )
    .unwrap();

    engine.play();
    engine.seek_to_frame(1);
    assert_eq!(notifiers.borrow().len(), 2);

    notifiers.borrow()[0].ended();
    engine.process_pending();
    assert_eq!(engine.current_frame(), 1);
    assert!(engine.is_playing());
}

#[test]
fn silent_lesson_plays_on_fallback_ticks() {
    let clock = ManualClock::new();
    let mut engine =
        PlaybackEngine::new("lesson1", lesson(), Box::new(Silent), Box::new(clock.clone()))
            .unwrap()
            .with_tick_interval(std::time::Duration::from_millis(500));

    engine.play();
    assert_eq!(engine.snapshot().mode, Mode::FallbackTimed);

    // 1000 ms per slide at 500 ms per tick
    for _ in 0..2 {
        clock.fire();
        engine.process_pending();
    }
    assert_eq!(engine.current_frame(), 1);

    for _ in 0..2 {
        clock.fire();
        engine.process_pending();
    }
    assert!(engine.is_complete());
    assert_eq!(clock.live_timers(), 0);
    assert_eq!(engine.lesson_progress(), 1.0);
    assert_eq!(engine.frames().total_nominal_ms(), 2_000);
}
