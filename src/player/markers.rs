//! Slide boundaries on the lesson timeline.
//!
//! The progress bar spans the whole lesson by nominal duration. Each slide
//! after the first gets a marker where it starts, and clicks on the bar are
//! mapped back to the slide under the cursor.

use crate::lesson::{FrameSequence, Lesson};
use crate::player::state::MarkerPosition;

/// Collect a marker for every slide boundary.
pub fn collect_markers(lesson: &Lesson) -> Vec<MarkerPosition> {
    (1..lesson.frame_count())
        .map(|index| MarkerPosition {
            time: lesson.frame_start_ms(index) as f64 / 1000.0,
            label: lesson
                .slide(index)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Slide playing at nominal time `seconds` into the lesson.
pub fn slide_at_time<S: FrameSequence>(frames: &S, seconds: f64) -> usize {
    let target_ms = (seconds.max(0.0) * 1000.0) as u64;
    let mut start = 0u64;
    for index in 0..frames.frame_count() {
        start += frames.nominal_duration_ms(index);
        if target_ms < start {
            return index;
        }
    }
    frames.frame_count().saturating_sub(1)
}
