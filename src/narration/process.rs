//! Narration played through an external audio player process.
//!
//! One child process per slide. A watcher thread polls the child and reports
//! progress, then `ended` on a clean exit or `error` on a failing one.
//! Stopping kills and reaps the child; the watcher then exits silently.

use std::path::PathBuf;
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::error::NarrationError;
use super::probe::probe_duration;
use super::resolver::AudioResolver;
use super::tool::AudioTool;
use super::{NarrationResource, NarrationSource};
use crate::engine::Notifier;

/// Default interval between child status polls / progress reports.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Narration source backed by files on disk and an external player.
pub struct ProcessNarration {
    resolver: AudioResolver,
    tool: Option<Arc<dyn AudioTool>>,
    estimates: Vec<Duration>,
    poll_interval: Duration,
    probe: bool,
}

impl ProcessNarration {
    /// Create a source. With no tool, every existing file fails to start and
    /// the engine falls back to timed advancement.
    pub fn new(resolver: AudioResolver, tool: Option<Box<dyn AudioTool>>) -> Self {
        Self {
            resolver,
            tool: tool.map(Arc::from),
            estimates: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            probe: true,
        }
    }

    /// Per-frame duration estimates used when a file can't be probed.
    pub fn with_estimates(mut self, nominal_ms: &[u64]) -> Self {
        self.estimates = nominal_ms
            .iter()
            .map(|&ms| Duration::from_millis(ms))
            .collect();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(10));
        self
    }

    /// Enable or disable ffprobe duration lookups.
    pub fn with_probe(mut self, probe: bool) -> Self {
        self.probe = probe;
        self
    }

    pub fn resolver(&self) -> &AudioResolver {
        &self.resolver
    }

    /// Name of the player in use, if any.
    pub fn tool_name(&self) -> Option<&'static str> {
        self.tool.as_ref().map(|t| t.name())
    }
}

impl NarrationSource for ProcessNarration {
    fn acquire(
        &mut self,
        lesson_id: &str,
        frame_index: usize,
    ) -> Result<Box<dyn NarrationResource>, NarrationError> {
        let path = self.resolver.resolve(lesson_id, frame_index)?;
        let tool = self.tool.clone().ok_or_else(|| {
            NarrationError::AcquisitionFailed(
                "no audio player available (install ffplay or mpv)".to_string(),
            )
        })?;

        let probed = if self.probe {
            probe_duration(&path)
        } else {
            None
        };
        let duration = probed.or_else(|| self.estimates.get(frame_index).copied());

        tracing::debug!(path = %path.display(), ?duration, "acquired narration");
        Ok(Box::new(ProcessResource {
            path,
            tool,
            duration,
            poll_interval: self.poll_interval,
            shared: None,
        }))
    }
}

/// State shared between a resource and its watcher thread.
struct Shared {
    child: Mutex<Child>,
    stopped: AtomicBool,
}

impl Shared {
    fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// One narration file being played by a child process.
pub struct ProcessResource {
    path: PathBuf,
    tool: Arc<dyn AudioTool>,
    duration: Option<Duration>,
    poll_interval: Duration,
    shared: Option<Arc<Shared>>,
}

impl ProcessResource {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl NarrationResource for ProcessResource {
    fn play(&mut self, notifier: Notifier) -> Result<(), NarrationError> {
        if self.shared.is_some() {
            return Err(NarrationError::AcquisitionFailed(
                "narration already playing".to_string(),
            ));
        }

        let name = self.tool.name();
        let child = self
            .tool
            .spawn(&self.path)
            .map_err(|e| NarrationError::AcquisitionFailed(format!("{}: {}", name, e)))?;

        let shared = Arc::new(Shared {
            child: Mutex::new(child),
            stopped: AtomicBool::new(false),
        });
        let watcher = Arc::clone(&shared);
        let duration = self.duration;
        let poll = self.poll_interval;

        let spawned = thread::Builder::new()
            .name("lectern-narration".to_string())
            .spawn(move || watch(watcher, notifier, duration, poll, name));

        if let Err(e) = spawned {
            shared.stop();
            return Err(NarrationError::AcquisitionFailed(e.to_string()));
        }

        self.shared = Some(shared);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.stop();
        }
    }
}

impl Drop for ProcessResource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Watcher loop: poll the child until it exits or the resource is stopped.
fn watch(
    shared: Arc<Shared>,
    notifier: Notifier,
    duration: Option<Duration>,
    poll: Duration,
    name: &'static str,
) {
    let started = Instant::now();
    loop {
        if shared.is_stopped() {
            return;
        }

        let status = match shared.child.lock() {
            Ok(mut child) => child.try_wait(),
            Err(_) => return,
        };

        match status {
            Ok(Some(status)) => {
                if shared.is_stopped() {
                    return;
                }
                if status.success() {
                    notifier.ended();
                } else {
                    notifier.error(format!("{} exited with {}", name, status));
                }
                return;
            }
            Ok(None) => {
                if let Some(total) = duration {
                    let fraction = started.elapsed().as_secs_f64() / total.as_secs_f64();
                    if !notifier.progress(fraction.min(1.0)) {
                        // Engine is gone; nobody will ever stop us
                        shared.stop();
                        return;
                    }
                }
            }
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        }

        thread::sleep(poll);
    }
}
