//! Frame model consumed by the playback engine.
//!
//! A frame is one narrated content unit. The engine only ever looks at
//! `index` and `nominal_duration_ms`; the content is opaque to it.

/// One narrated content unit in a lesson's ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<C> {
    /// Zero-based position in the sequence
    pub index: usize,
    /// Estimated spoken duration, used only when narration timing is unavailable.
    /// Always greater than zero.
    pub nominal_duration_ms: u64,
    /// Opaque payload rendered by the host
    pub content: C,
}

impl<C> Frame<C> {
    pub fn new(index: usize, nominal_duration_ms: u64, content: C) -> Self {
        Self {
            index,
            nominal_duration_ms,
            content,
        }
    }
}

/// Read-only, ordered, finite sequence of frames.
pub trait FrameSequence {
    type Content;

    /// Number of frames in the sequence.
    fn frame_count(&self) -> usize;

    /// Frame at `index`, or `None` when out of range.
    fn get_frame(&self, index: usize) -> Option<&Frame<Self::Content>>;

    /// Nominal duration of the frame at `index` (0 when out of range).
    fn nominal_duration_ms(&self, index: usize) -> u64 {
        self.get_frame(index)
            .map(|f| f.nominal_duration_ms)
            .unwrap_or(0)
    }

    /// Sum of all nominal durations, saturating at `u64::MAX`.
    fn total_nominal_ms(&self) -> u64 {
        (0..self.frame_count())
            .map(|i| self.nominal_duration_ms(i))
            .fold(0, u64::saturating_add)
    }

    /// Nominal offset at which the frame at `index` starts.
    fn frame_start_ms(&self, index: usize) -> u64 {
        (0..index.min(self.frame_count()))
            .map(|i| self.nominal_duration_ms(i))
            .fold(0, u64::saturating_add)
    }
}

impl<C> FrameSequence for Vec<Frame<C>> {
    type Content = C;

    fn frame_count(&self) -> usize {
        self.len()
    }

    fn get_frame(&self, index: usize) -> Option<&Frame<C>> {
        self.get(index)
    }
}

/// Build a content-less frame sequence from nominal durations.
pub fn frames_from_durations(durations: &[u64]) -> Vec<Frame<()>> {
    durations
        .iter()
        .enumerate()
        .map(|(index, &ms)| Frame::new(index, ms, ()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sequence_reports_count_and_frames() {
        let frames = frames_from_durations(&[1000, 2000, 3000]);
        assert_eq!(frames.frame_count(), 3);
        assert_eq!(frames.get_frame(1).map(|f| f.index), Some(1));
        assert!(frames.get_frame(3).is_none());
    }

    #[test]
    fn nominal_duration_out_of_range_is_zero() {
        let frames = frames_from_durations(&[1000]);
        assert_eq!(frames.nominal_duration_ms(0), 1000);
        assert_eq!(frames.nominal_duration_ms(5), 0);
    }

    #[test]
    fn total_and_start_offsets() {
        let frames = frames_from_durations(&[1000, 2000, 3000]);
        assert_eq!(frames.total_nominal_ms(), 6000);
        assert_eq!(frames.frame_start_ms(0), 0);
        assert_eq!(frames.frame_start_ms(2), 3000);
        // Past the end clamps to the total
        assert_eq!(frames.frame_start_ms(10), 6000);
    }

    #[test]
    fn huge_durations_saturate_instead_of_overflowing() {
        let frames = frames_from_durations(&[u64::MAX, 5, 7]);
        assert_eq!(frames.total_nominal_ms(), u64::MAX);
        assert_eq!(frames.frame_start_ms(1), u64::MAX);
        assert_eq!(frames.frame_start_ms(2), u64::MAX);
    }
}
