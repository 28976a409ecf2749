//! Generation-tagged callbacks from timing sources.
//!
//! Narration resources and clocks never touch engine state. They hold a
//! [`Notifier`] and push [`EngineEvent`]s into the engine's queue; the engine
//! drops any event whose generation is not the one it currently owns.

use std::sync::mpsc::Sender;

/// Monotonic tag identifying one acquired timing source.
pub type Generation = u64;

/// A callback from a timing source, queued for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Narration reported playback progress (elapsed / duration)
    Progress {
        generation: Generation,
        fraction: f64,
    },
    /// Narration reached its natural end
    Ended { generation: Generation },
    /// Narration failed after starting
    Error {
        generation: Generation,
        message: String,
    },
    /// Fallback clock fired
    Tick { generation: Generation },
}

impl EngineEvent {
    /// Generation of the source that produced this event.
    pub fn generation(&self) -> Generation {
        match self {
            Self::Progress { generation, .. }
            | Self::Ended { generation }
            | Self::Error { generation, .. }
            | Self::Tick { generation } => *generation,
        }
    }
}

/// Handle given to a timing source for reporting back to the engine.
///
/// Every event it sends carries the generation it was created with.
/// Sends after the engine is gone are silently discarded.
#[derive(Debug, Clone)]
pub struct Notifier {
    generation: Generation,
    tx: Sender<EngineEvent>,
}

impl Notifier {
    pub(crate) fn new(generation: Generation, tx: Sender<EngineEvent>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Report progress. Returns false once the engine is gone.
    pub fn progress(&self, fraction: f64) -> bool {
        self.send(EngineEvent::Progress {
            generation: self.generation,
            fraction,
        })
    }

    pub fn ended(&self) {
        self.send(EngineEvent::Ended {
            generation: self.generation,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(EngineEvent::Error {
            generation: self.generation,
            message: message.into(),
        });
    }

    /// Send a clock tick. Returns false once the engine is gone, so timer
    /// threads know to exit.
    pub fn tick(&self) -> bool {
        self.send(EngineEvent::Tick {
            generation: self.generation,
        })
    }

    fn send(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}
