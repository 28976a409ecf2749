//! Presentation clocks: the fallback timing source.
//!
//! A clock fires a periodic tick through a [`Notifier`] until the returned
//! [`CancelHandle`] is cancelled or dropped. The engine only uses a clock
//! when narration is unavailable for the current slide.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::engine::Notifier;

/// Errors when scheduling a tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("Fallback timer is disabled")]
    Unavailable,

    #[error("Failed to start timer thread: {0}")]
    Spawn(String),
}

/// Owning side of a scheduled timer. Cancels on drop.
#[derive(Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

/// Observing side of a scheduled timer, held by whoever fires the ticks.
#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a linked handle/token pair.
    pub fn pair() -> (Self, CancelToken) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                flag: Arc::clone(&flag),
            },
            CancelToken { flag },
        )
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A periodic tick capability.
pub trait PresentationClock {
    fn schedule_tick(
        &mut self,
        interval: Duration,
        notifier: Notifier,
    ) -> Result<CancelHandle, ClockError>;
}

/// Wall-clock timer: one background thread per scheduled timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl PresentationClock for ThreadClock {
    fn schedule_tick(
        &mut self,
        interval: Duration,
        notifier: Notifier,
    ) -> Result<CancelHandle, ClockError> {
        let (handle, token) = CancelHandle::pair();
        thread::Builder::new()
            .name("lectern-clock".to_string())
            .spawn(move || {
                // Tick k is due at start + k * interval
                let mut due = Instant::now();
                loop {
                    due += interval;
                    thread::sleep(due.saturating_duration_since(Instant::now()));
                    if token.is_cancelled() || !notifier.tick() {
                        return;
                    }
                }
            })
            .map_err(|e| ClockError::Spawn(e.to_string()))?;
        Ok(handle)
    }
}

/// A clock that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClock;

impl PresentationClock for DisabledClock {
    fn schedule_tick(
        &mut self,
        _interval: Duration,
        _notifier: Notifier,
    ) -> Result<CancelHandle, ClockError> {
        Err(ClockError::Unavailable)
    }
}

struct ManualTimer {
    interval: Duration,
    notifier: Notifier,
    token: CancelToken,
}

/// Host-driven clock: ticks only when [`ManualClock::fire`] is called.
///
/// Clones share the same timers, so a host (or test) can keep one clone and
/// hand the other to the engine.
#[derive(Clone, Default)]
pub struct ManualClock {
    timers: Rc<RefCell<Vec<ManualTimer>>>,
    scheduled: Rc<Cell<usize>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick every live timer once. Returns how many ticks were sent.
    pub fn fire(&self) -> usize {
        let mut timers = self.timers.borrow_mut();
        timers.retain(|t| !t.token.is_cancelled());
        timers.iter().filter(|t| t.notifier.tick()).count()
    }

    /// Number of timers that have not been cancelled.
    pub fn live_timers(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .count()
    }

    /// Total number of timers ever scheduled.
    pub fn scheduled(&self) -> usize {
        self.scheduled.get()
    }

    /// Interval of the most recently scheduled live timer.
    pub fn interval(&self) -> Option<Duration> {
        self.timers
            .borrow()
            .iter()
            .rev()
            .find(|t| !t.token.is_cancelled())
            .map(|t| t.interval)
    }
}

impl PresentationClock for ManualClock {
    fn schedule_tick(
        &mut self,
        interval: Duration,
        notifier: Notifier,
    ) -> Result<CancelHandle, ClockError> {
        let (handle, token) = CancelHandle::pair();
        self.scheduled.set(self.scheduled.get() + 1);
        self.timers.borrow_mut().push(ManualTimer {
            interval,
            notifier,
            token,
        });
        Ok(handle)
    }
}
