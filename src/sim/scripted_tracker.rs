use std::collections::BTreeMap;

use crate::frame::{FrameInfo, FrameSnapshot};
use crate::traits::TrackingSource;
use crate::types::TrackedImage;

/// Deterministic frame clock: frame `n` happens at `n / fps` seconds
#[derive(Debug, Clone)]
pub struct FixedRateFrames {
    fps: f32,
    next: u64,
}

impl FixedRateFrames {
    pub fn new(fps: f32) -> Self {
        Self { fps, next: 0 }
    }
}

impl Iterator for FixedRateFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let number = self.next;
        self.next += 1;
        Some(FrameInfo::new(number, number as f32 / self.fps, 1.0 / self.fps))
    }
}

/// Tracking source replaying a fixed script of per-frame image updates
#[derive(Debug, Clone)]
pub struct ScriptedTracker<F = FixedRateFrames> {
    clock: F,
    script: BTreeMap<u64, Vec<TrackedImage>>,
    frame_limit: u64,
    produced: u64,
}

impl ScriptedTracker<FixedRateFrames> {
    /// `frame_limit` frames at a fixed `fps`
    pub fn new(frame_limit: u64, fps: f32) -> Self {
        Self::with_clock(FixedRateFrames::new(fps), frame_limit)
    }
}

impl<F: Iterator<Item = FrameInfo>> ScriptedTracker<F> {
    /// Frames stamped by `clock`, e.g. a wall-clock [`crate::frame::FrameIterator`]
    pub fn with_clock(clock: F, frame_limit: u64) -> Self {
        Self {
            clock,
            script: BTreeMap::new(),
            frame_limit,
            produced: 0,
        }
    }

    /// Report `image` as updated in frame `frame`
    pub fn with_update(mut self, frame: u64, image: TrackedImage) -> Self {
        self.script.entry(frame).or_default().push(image);
        self
    }

    /// Report `image` as updated every `every` frames in `range`
    pub fn with_repeating_update(
        mut self,
        range: std::ops::Range<u64>,
        every: u64,
        image: TrackedImage,
    ) -> Self {
        for frame in range.step_by(every.max(1) as usize) {
            self.script.entry(frame).or_default().push(image.clone());
        }
        self
    }
}

impl<F: Iterator<Item = FrameInfo>> Iterator for ScriptedTracker<F> {
    type Item = FrameSnapshot;

    fn next(&mut self) -> Option<FrameSnapshot> {
        if self.produced >= self.frame_limit {
            return None;
        }
        let mut info = self.clock.next()?;
        info.number = self.produced;
        self.produced += 1;

        let updated = self.script.remove(&info.number).unwrap_or_default();
        Some(FrameSnapshot::new(info, updated))
    }
}

impl<F: Iterator<Item = FrameInfo>> TrackingSource for ScriptedTracker<F> {
    fn frame_count(&self) -> u64 {
        self.produced
    }
}
