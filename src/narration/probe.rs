//! Narration length lookup.
//!
//! Progress is reported as elapsed / duration, so the process-backed source
//! needs the real length of each file. `ffprobe` provides it when installed;
//! otherwise callers fall back to the slide's nominal duration.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Ask ffprobe for the duration of an audio file.
pub fn probe_duration(path: &Path) -> Option<Duration> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse ffprobe's bare seconds output (e.g. `"12.345000\n"`).
fn parse_duration_output(stdout: &str) -> Option<Duration> {
    let secs: f64 = stdout.lines().next()?.trim().parse().ok()?;
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
